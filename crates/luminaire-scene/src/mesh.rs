//! Mesh buffers and the host-supplied load/decode capabilities.

use serde::{Deserialize, Serialize};

use luminaire_types::GeometryDefinition;

use crate::error::DecodeError;
use crate::geometry::{Point3d, Vec3};
use crate::transform::{BoundingBox, Transform};

/// A triangle mesh for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals [nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Triangle indices [i0, i1, i2, ...]
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn add_vertex(&mut self, pos: Point3d, normal: Vec3) -> u32 {
        let idx = self.vertex_count() as u32;
        self.positions
            .extend_from_slice(&[pos.x as f32, pos.y as f32, pos.z as f32]);
        self.normals
            .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
        idx
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    fn position(&self, i: usize) -> Point3d {
        Point3d::new(
            self.positions[i * 3] as f64,
            self.positions[i * 3 + 1] as f64,
            self.positions[i * 3 + 2] as f64,
        )
    }

    /// Local-space bounds, `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        if self.vertex_count() == 0 {
            return None;
        }
        let points: Vec<Point3d> = (0..self.vertex_count()).map(|i| self.position(i)).collect();
        Some(BoundingBox::from_points(&points))
    }

    /// Copy of the mesh with `transform` baked into its vertices.
    ///
    /// Normals are transformed as vectors and re-normalized; the matrix itself
    /// is used as given.
    pub fn transformed(&self, transform: &Transform) -> TriangleMesh {
        let mut out = TriangleMesh {
            positions: Vec::with_capacity(self.positions.len()),
            normals: Vec::with_capacity(self.normals.len()),
            indices: self.indices.clone(),
        };
        for i in 0..self.vertex_count() {
            let p = transform.transform_point(&self.position(i));
            out.positions
                .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        }
        for n in self.normals.chunks_exact(3) {
            let v = Vec3::new(n[0] as f64, n[1] as f64, n[2] as f64);
            let v = transform.transform_vector(&v).normalize();
            out.normals
                .extend_from_slice(&[v.x as f32, v.y as f32, v.z as f32]);
        }
        out
    }
}

/// Local-space extent of a mesh template, used for scene framing.
pub trait MeshBounds {
    fn local_bounds(&self) -> Option<BoundingBox>;
}

impl MeshBounds for TriangleMesh {
    fn local_bounds(&self) -> Option<BoundingBox> {
        self.bounds()
    }
}

/// Source of raw mesh bytes, keyed by geometry definition.
///
/// The returned buffer is owned by the caller for exactly one decode and is
/// dropped as soon as that decode finishes, on every path. Hosts that need to
/// release something (a temporary file, a pooled buffer) do it in the
/// buffer's `Drop`.
pub trait MeshLoader {
    type Bytes: AsRef<[u8]>;

    fn load(&mut self, geometry: &GeometryDefinition) -> Option<Self::Bytes>;
}

impl<F, B> MeshLoader for F
where
    F: FnMut(&GeometryDefinition) -> Option<B>,
    B: AsRef<[u8]>,
{
    type Bytes = B;

    fn load(&mut self, geometry: &GeometryDefinition) -> Option<B> {
        self(geometry)
    }
}

/// Turns mesh bytes into a renderable template.
pub trait MeshDecoder {
    type Mesh;

    fn decode(&self, geometry: &GeometryDefinition, bytes: &[u8])
        -> Result<Self::Mesh, DecodeError>;
}
