//! 3D scene assembly for L3D luminaire geometry.
//!
//! [`assemble`] walks the parts of an [`L3dScene`](luminaire_types::L3dScene),
//! decodes each referenced geometry once, and emits a [`SceneGraph`] of
//! transformed mesh nodes and light-emitting markers. Mesh bytes come from a
//! [`MeshLoader`] and are turned into templates by a [`MeshDecoder`]; both are
//! supplied by the host.

pub mod apply;
pub mod assembler;
pub mod config;
pub mod error;
pub mod framing;
pub mod geometry;
pub mod graph;
pub mod mesh;
pub mod transform;

pub use apply::apply_transform;
pub use assembler::{assemble, Assembler, CancelToken};
pub use config::AssemblyConfig;
pub use error::{AssembleError, DecodeError};
pub use framing::CameraFit;
pub use graph::{MarkerNode, MarkerShape, MeshId, MeshNode, SceneGraph, SceneNode};
pub use mesh::{MeshBounds, MeshDecoder, MeshLoader, TriangleMesh};
pub use transform::{BoundingBox, Transform};
