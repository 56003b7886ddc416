//! Helper functions: error type, fixture datasets and scenes, instrumented loaders.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use luminaire_scene::geometry::{Point3d, Vec3};
use luminaire_scene::{DecodeError, MeshDecoder, MeshLoader, TriangleMesh};
use luminaire_types::{GeometryDefinition, L3dScene, PhotometricDataset};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("fixture error: {0}")]
    Fixture(#[from] serde_json::Error),
}

// ── Photometric Fixtures ────────────────────────────────────────────────────

fn gamma_steps(count: usize, step: f64) -> Vec<f64> {
    (0..count).map(|i| i as f64 * step).collect()
}

fn lower_hemisphere(peak: f64, gamma: f64) -> f64 {
    if gamma <= 90.0 {
        peak * gamma.to_radians().cos().powi(2)
    } else {
        0.0
    }
}

/// Rotationally symmetric downlight: one C-plane, gamma 0..180 in 10° steps.
pub fn downlight() -> PhotometricDataset {
    let gamma_angles = gamma_steps(19, 10.0);
    PhotometricDataset {
        manufacturer: "Acme Lighting".into(),
        luminaire_name: "Downlight DL-100".into(),
        lamp_type: "LED 3000K".into(),
        total_lumens: 1500.0,
        wattage: 12.5,
        lorl: 90.0,
        max_intensity: 1000.0,
        symmetry: 1,
        c_plane_count: 1,
        gamma_count: 19,
        c_angles: vec![0.0],
        intensities: gamma_angles.iter().map(|&g| lower_hemisphere(1000.0, g)).collect(),
        gamma_angles,
    }
}

/// Linear luminaire with quad symmetry: 24 C-planes in 15° steps, wider across C90.
pub fn linear_luminaire() -> PhotometricDataset {
    let c_angles = gamma_steps(24, 15.0);
    let gamma_angles = gamma_steps(19, 10.0);
    let intensities = c_angles
        .iter()
        .flat_map(|&c| {
            let width = 0.6 + 0.4 * c.to_radians().sin().abs();
            gamma_angles
                .iter()
                .map(move |&g| width * lower_hemisphere(800.0, g * (1.5 - width)))
        })
        .collect();
    PhotometricDataset {
        manufacturer: "Acme Lighting".into(),
        luminaire_name: "Linear L-1200".into(),
        lamp_type: "LED 4000K".into(),
        total_lumens: 4200.0,
        wattage: 35.0,
        lorl: 82.0,
        max_intensity: 800.0,
        symmetry: 4,
        c_plane_count: 24,
        gamma_count: 19,
        c_angles,
        gamma_angles,
        intensities,
    }
}

/// Four planes of five gammas, with only the first 12 of 20 values stored.
pub fn truncated() -> PhotometricDataset {
    PhotometricDataset {
        luminaire_name: "Truncated".into(),
        max_intensity: 500.0,
        symmetry: 0,
        c_plane_count: 4,
        gamma_count: 5,
        c_angles: vec![0.0, 90.0, 180.0, 270.0],
        gamma_angles: gamma_steps(5, 45.0),
        intensities: vec![
            500.0, 400.0, 200.0, 0.0, 0.0, //
            450.0, 350.0, 150.0, 0.0, 0.0, //
            480.0, 380.0,
        ],
        ..Default::default()
    }
}

/// Header only: angles but no intensities.
pub fn empty_dataset() -> PhotometricDataset {
    PhotometricDataset {
        luminaire_name: "Empty".into(),
        symmetry: 0,
        c_plane_count: 4,
        gamma_count: 19,
        c_angles: vec![0.0, 90.0, 180.0, 270.0],
        gamma_angles: gamma_steps(19, 10.0),
        ..Default::default()
    }
}

// ── Scene Fixtures ──────────────────────────────────────────────────────────

/// Parse a scene from the JSON shape the upstream parser emits.
pub fn scene_from_json(json: &str) -> Result<L3dScene, HarnessError> {
    Ok(serde_json::from_str(json)?)
}

/// Two-headed track light: both heads share one geometry, plus a part whose
/// geometry is not defined.
pub const TRACK_LIGHT_JSON: &str = r#"{
  "geometryDefinitions": [
    { "id": "base", "filename": "base.tri", "units": "m" },
    { "id": "head", "filename": "head.tri", "units": "m" }
  ],
  "parts": [
    {
      "partName": "base",
      "geometryId": "base",
      "worldTransform": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]
    },
    {
      "partName": "head_left",
      "geometryId": "head",
      "worldTransform": [1,0,0,0, 0,1,0,0, 0,0,1,0, -0.5,0,-0.1,1],
      "lightEmittingObjects": [
        { "partName": "leo_left", "position": [0,0,-0.05], "shapeType": "circle", "shapeDimensions": [0.08] }
      ]
    },
    {
      "partName": "head_right",
      "geometryId": "head",
      "worldTransform": [0,1,0,0, -1,0,0,0, 0,0,1,0, 0.5,0,-0.1,1],
      "lightEmittingObjects": [
        { "partName": "leo_right", "position": [0,0,-0.05], "shapeType": "circle" }
      ]
    },
    {
      "partName": "cover",
      "geometryId": "missing",
      "worldTransform": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]
    }
  ],
  "joints": [
    { "partName": "head_left", "position": [-0.5,0,0], "rotation": [0,0,0], "children": ["head_left"] }
  ]
}"#;

pub fn track_light_scene() -> Result<L3dScene, HarnessError> {
    scene_from_json(TRACK_LIGHT_JSON)
}

/// Mesh bytes for the track light geometries in [`TextMeshDecoder`] format.
pub fn track_light_assets() -> HashMap<String, Vec<u8>> {
    let base = "0 0 0\n1 0 0\n0 1 0\n# second face\n0 0 0\n0 1 0\n0 0 0.2\n";
    let head = "-0.1 -0.1 0\n0.1 -0.1 0\n0 0.1 0\n";
    HashMap::from([
        ("base".to_string(), base.as_bytes().to_vec()),
        ("head".to_string(), head.as_bytes().to_vec()),
    ])
}

// ── Mesh Decoding ───────────────────────────────────────────────────────────

/// Decodes `.tri` text: one `x y z` vertex per line, three lines per triangle.
///
/// Blank lines and `#` comments are ignored. Normals are the flat face normal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMeshDecoder;

impl MeshDecoder for TextMeshDecoder {
    type Mesh = TriangleMesh;

    fn decode(&self, geometry: &GeometryDefinition, bytes: &[u8]) -> Result<TriangleMesh, DecodeError> {
        let filename = geometry.filename.clone();
        if !filename.ends_with(".tri") {
            return Err(DecodeError::UnsupportedFormat { filename });
        }
        if bytes.is_empty() {
            return Err(DecodeError::Empty { filename });
        }
        let malformed = |reason: String| DecodeError::Malformed {
            filename: geometry.filename.clone(),
            reason,
        };
        let text = std::str::from_utf8(bytes).map_err(|e| malformed(e.to_string()))?;

        let mut points = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let coords = line
                .split_whitespace()
                .map(str::parse::<f64>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| malformed(format!("line {}: {e}", line_no + 1)))?;
            let &[x, y, z] = coords.as_slice() else {
                return Err(malformed(format!("line {}: expected 3 coordinates", line_no + 1)));
            };
            points.push(Point3d::new(x, y, z));
        }
        if points.is_empty() || points.len() % 3 != 0 {
            return Err(malformed(format!("{} vertices is not a whole number of triangles", points.len())));
        }

        let mut mesh = TriangleMesh::new();
        for tri in points.chunks_exact(3) {
            let normal = face_normal(tri[0], tri[1], tri[2]);
            let a = mesh.add_vertex(tri[0], normal);
            let b = mesh.add_vertex(tri[1], normal);
            let c = mesh.add_vertex(tri[2], normal);
            mesh.add_triangle(a, b, c);
        }
        Ok(mesh)
    }
}

fn face_normal(a: Point3d, b: Point3d, c: Point3d) -> Vec3 {
    let u = b - a;
    let v = c - a;
    Vec3::new(u.y * v.z - u.z * v.y, u.z * v.x - u.x * v.z, u.x * v.y - u.y * v.x).normalize()
}

// ── Instrumented Loader ─────────────────────────────────────────────────────

/// Buffer handed out by [`CountingLoader`]; dropping it releases the loan.
#[derive(Debug)]
pub struct TrackedBuffer {
    data: Vec<u8>,
    outstanding: Arc<AtomicUsize>,
}

impl AsRef<[u8]> for TrackedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Drop for TrackedBuffer {
    fn drop(&mut self) {
        self.outstanding.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Serves mesh bytes by geometry id and records every load.
#[derive(Debug, Default)]
pub struct CountingLoader {
    assets: HashMap<String, Vec<u8>>,
    calls: HashMap<String, usize>,
    order: Vec<String>,
    outstanding: Arc<AtomicUsize>,
}

impl CountingLoader {
    pub fn new(assets: HashMap<String, Vec<u8>>) -> Self {
        Self {
            assets,
            ..Default::default()
        }
    }

    /// Number of loads requested for `geometry_id`, successful or not.
    pub fn calls(&self, geometry_id: &str) -> usize {
        self.calls.get(geometry_id).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.order.len()
    }

    /// Geometry ids in the order they were requested.
    pub fn call_order(&self) -> &[String] {
        &self.order
    }

    /// Buffers handed out and not yet dropped.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Forget recorded calls; assets and outstanding buffers are kept.
    pub fn reset(&mut self) {
        self.calls.clear();
        self.order.clear();
    }
}

impl MeshLoader for CountingLoader {
    type Bytes = TrackedBuffer;

    fn load(&mut self, geometry: &GeometryDefinition) -> Option<TrackedBuffer> {
        *self.calls.entry(geometry.id.clone()).or_default() += 1;
        self.order.push(geometry.id.clone());
        let data = self.assets.get(&geometry.id)?.clone();
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        Some(TrackedBuffer {
            data,
            outstanding: Arc::clone(&self.outstanding),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri_geometry() -> GeometryDefinition {
        GeometryDefinition {
            id: "t".into(),
            filename: "t.tri".into(),
            units: "m".into(),
        }
    }

    #[test]
    fn test_decode_triangles() {
        let mesh = TextMeshDecoder
            .decode(&tri_geometry(), b"0 0 0\n1 0 0\n0 1 0\n")
            .unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(&mesh.normals[0..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_decode_errors() {
        let g = tri_geometry();
        assert!(matches!(TextMeshDecoder.decode(&g, b""), Err(DecodeError::Empty { .. })));
        assert!(matches!(
            TextMeshDecoder.decode(&g, b"0 0 0\n1 0\n"),
            Err(DecodeError::Malformed { .. })
        ));
        assert!(matches!(
            TextMeshDecoder.decode(&g, b"0 0 0\n1 0 0\n"),
            Err(DecodeError::Malformed { .. })
        ));
        let obj = GeometryDefinition {
            filename: "t.obj".into(),
            ..tri_geometry()
        };
        assert!(matches!(
            TextMeshDecoder.decode(&obj, b"0 0 0"),
            Err(DecodeError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_counting_loader_tracks_buffers() {
        let mut loader = CountingLoader::new(track_light_assets());
        let head = GeometryDefinition {
            id: "head".into(),
            ..Default::default()
        };
        let buffer = loader.load(&head).unwrap();
        assert_eq!(loader.outstanding(), 1);
        drop(buffer);
        assert_eq!(loader.outstanding(), 0);

        let missing = GeometryDefinition {
            id: "nope".into(),
            ..Default::default()
        };
        assert!(loader.load(&missing).is_none());
        assert_eq!(loader.calls("head"), 1);
        assert_eq!(loader.calls("nope"), 1);
        assert_eq!(loader.call_order(), ["head", "nope"]);
    }

    #[test]
    fn test_fixtures_are_consistent() {
        for ds in [downlight(), linear_luminaire()] {
            assert_eq!(ds.intensities.len(), ds.nominal_len());
            assert_eq!(ds.gamma_angles.len(), ds.gamma_count);
        }
        assert!(photometry::is_truncated(&truncated()));
        assert!(empty_dataset().is_empty());
        let scene = track_light_scene().unwrap();
        assert_eq!(scene.parts.len(), 4);
        assert_eq!(scene.light_emitting_object_count(), 2);
    }
}
