use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use luminaire_scene::{AssemblyConfig, MarkerShape};
use luminaire_types::{Joint, L3dScene, PhotometricDataset};
use photometry::{ActivePlaneRange, DiagramConfig, DiagramGeometry, DiagramMode};

use crate::assets::AssetMesh;

/// Messages from the UI to the engine.
/// Serialized as JSON for postMessage transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToEngine {
    /// Render a diagram as drawing primitives.
    RenderDiagram {
        dataset: PhotometricDataset,
        mode: DiagramMode,
        width: f64,
        height: f64,
        #[serde(default)]
        config: Option<DiagramConfig>,
    },
    /// Render a diagram straight to an SVG document.
    RenderDiagramSvg {
        dataset: PhotometricDataset,
        mode: DiagramMode,
        width: f64,
        height: f64,
        #[serde(default)]
        config: Option<DiagramConfig>,
    },
    /// Resolve the active C-plane range for a symmetry code.
    ActivePlanes { symmetry: i32, c_plane_count: usize },
    /// Assemble an L3D scene. `assets` maps bundle filenames to base64 bytes.
    AssembleScene {
        scene: L3dScene,
        #[serde(default)]
        assets: HashMap<String, String>,
        #[serde(default)]
        config: Option<AssemblyConfig>,
    },
}

/// Messages from the engine back to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineToUi {
    Diagram { geometry: DiagramGeometry },

    DiagramSvg { svg: String, no_data: bool },

    /// `range` is the raw result; `clamped` is safe for indexing.
    ActivePlanes {
        range: ActivePlaneRange,
        clamped: ActivePlaneRange,
        count: usize,
    },

    /// Mesh nodes refer to entries of `meshes` by position.
    SceneAssembled {
        meshes: Vec<AssetMesh>,
        nodes: Vec<SceneNodeData>,
        joints: Vec<Joint>,
    },

    /// An error occurred in the engine.
    Error { message: String },
}

/// Flattened scene node for the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneNodeData {
    Mesh {
        name: String,
        mesh: usize,
        /// Column-major, as read from the scene.
        transform: [f64; 16],
    },
    Marker {
        name: String,
        parent: usize,
        position: [f64; 3],
        shape: MarkerShape,
    },
}
