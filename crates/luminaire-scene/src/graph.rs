//! Renderer-agnostic output of scene assembly.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use luminaire_types::Joint;

use crate::geometry::Point3d;
use crate::mesh::MeshBounds;
use crate::transform::{BoundingBox, Transform};

new_key_type! {
    /// Handle of a decoded mesh template inside a [`SceneGraph`].
    pub struct MeshId;
}

/// A placed instance of a mesh template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshNode {
    /// The part name.
    pub name: String,
    pub mesh: MeshId,
    /// Part world transform, column-major, exactly as read from the scene.
    pub transform: Transform,
}

/// Outline and size of a light-emitting marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MarkerShape {
    Circle { diameter: f64 },
    Rectangle { width: f64, height: f64 },
}

/// Non-geometric node showing where light leaves a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerNode {
    pub name: String,
    /// Index in [`SceneGraph::nodes`] of the mesh node this marker belongs to.
    pub parent: usize,
    /// Position as given by the light-emitting object, not multiplied by the
    /// parent's transform.
    pub position: Point3d,
    pub shape: MarkerShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneNode {
    Mesh(MeshNode),
    Marker(MarkerNode),
}

impl SceneNode {
    pub fn name(&self) -> &str {
        match self {
            SceneNode::Mesh(n) => &n.name,
            SceneNode::Marker(n) => &n.name,
        }
    }
}

/// Mesh templates plus the ordered node list that places them.
///
/// Each template is stored once in `meshes`; every part using it becomes its
/// own [`MeshNode`]. A marker always follows the mesh node it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneGraph<M> {
    pub meshes: SlotMap<MeshId, M>,
    pub nodes: Vec<SceneNode>,
    /// Passed through from the input scene.
    pub joints: Vec<Joint>,
}

impl<M> Default for SceneGraph<M> {
    fn default() -> Self {
        Self {
            meshes: SlotMap::with_key(),
            nodes: Vec::new(),
            joints: Vec::new(),
        }
    }
}

impl<M> SceneGraph<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh_nodes(&self) -> impl Iterator<Item = &MeshNode> {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Mesh(m) => Some(m),
            SceneNode::Marker(_) => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerNode> {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Marker(m) => Some(m),
            SceneNode::Mesh(_) => None,
        })
    }

    pub fn mesh_node_count(&self) -> usize {
        self.mesh_nodes().count()
    }

    pub fn marker_count(&self) -> usize {
        self.markers().count()
    }

    pub fn mesh(&self, id: MeshId) -> Option<&M> {
        self.meshes.get(id)
    }

    /// Append a node and return its index.
    pub(crate) fn push(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// World-space box around every mesh node, `None` when nothing has extent.
    pub fn bounds(&self) -> Option<BoundingBox>
    where
        M: MeshBounds,
    {
        let bb = self
            .mesh_nodes()
            .filter_map(|node| {
                let local = self.meshes.get(node.mesh)?.local_bounds()?;
                Some(local.transformed(&node.transform))
            })
            .fold(BoundingBox::empty(), |acc, bb| acc.union(&bb));
        bb.is_valid().then_some(bb)
    }

    /// Clone a template with its node's transform applied, for hosts that want
    /// world-space vertices.
    pub fn baked(&self, node: &MeshNode, bake: impl Fn(&M, &Transform) -> M) -> Option<M> {
        self.meshes.get(node.mesh).map(|m| bake(m, &node.transform))
    }
}
