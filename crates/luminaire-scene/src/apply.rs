//! Placing a mesh template at a part's world transform.

use crate::graph::{MeshId, MeshNode};
use crate::transform::Transform;

/// Build a scene node for `mesh` placed by the column-major `matrix`.
///
/// The matrix is stored as given: no re-orthogonalization, no unit
/// conversion, no reordering to row-major.
pub fn apply_transform(mesh: MeshId, name: impl Into<String>, matrix: &[f64; 16]) -> MeshNode {
    MeshNode {
        name: name.into(),
        mesh,
        transform: Transform::from_column_major(*matrix),
    }
}
