use tracing::{debug, warn};

use luminaire_scene::{Assembler, SceneGraph, SceneNode};
use photometry::diagram::render_with;
use photometry::symmetry::active_plane_range;
use photometry::to_svg;

use crate::assets::{AssetDecoder, AssetLoader, AssetMesh};
use crate::messages::{EngineToUi, SceneNodeData, UiToEngine};

/// Errors from the bridge layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to parse message: {reason}")]
    Parse { reason: String },

    #[error("invalid asset {filename}: {reason}")]
    Asset { filename: String, reason: String },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

/// Dispatch a UI message and return the response.
///
/// Errors are turned into an [`EngineToUi::Error`] response.
pub fn dispatch(msg: UiToEngine) -> EngineToUi {
    match handle_message(msg) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "bridge message failed");
            EngineToUi::Error {
                message: e.to_string(),
            }
        }
    }
}

fn handle_message(msg: UiToEngine) -> Result<EngineToUi, BridgeError> {
    match msg {
        UiToEngine::RenderDiagram {
            dataset,
            mode,
            width,
            height,
            config,
        } => {
            let config = config.unwrap_or_default();
            let geometry = render_with(&dataset, mode, width, height, &config);
            Ok(EngineToUi::Diagram { geometry })
        }

        UiToEngine::RenderDiagramSvg {
            dataset,
            mode,
            width,
            height,
            config,
        } => {
            let config = config.unwrap_or_default();
            let geometry = render_with(&dataset, mode, width, height, &config);
            Ok(EngineToUi::DiagramSvg {
                svg: to_svg(&geometry),
                no_data: geometry.no_data,
            })
        }

        UiToEngine::ActivePlanes {
            symmetry,
            c_plane_count,
        } => {
            let range = active_plane_range(symmetry, c_plane_count);
            Ok(EngineToUi::ActivePlanes {
                range,
                clamped: range.clamped(c_plane_count),
                count: range.count(),
            })
        }

        UiToEngine::AssembleScene {
            scene,
            assets,
            config,
        } => {
            let mut loader = AssetLoader::from_base64(&assets)?;
            debug!(assets = loader.len(), "decoded scene assets");
            let assembler = Assembler::new(config.unwrap_or_default());
            let Ok(graph) = assembler.run(&scene, &mut loader, &AssetDecoder) else {
                // Without a cancel token `run` cannot fail.
                return Ok(EngineToUi::Error {
                    message: "scene assembly cancelled".to_string(),
                });
            };
            Ok(scene_response(graph))
        }
    }
}

/// Flatten a graph for the wire, numbering templates by insertion order.
fn scene_response(graph: SceneGraph<AssetMesh>) -> EngineToUi {
    let mut index = std::collections::HashMap::new();
    let mut meshes = Vec::with_capacity(graph.meshes.len());
    for (id, mesh) in graph.meshes {
        index.insert(id, meshes.len());
        meshes.push(mesh);
    }
    let nodes = graph
        .nodes
        .into_iter()
        .filter_map(|node| match node {
            SceneNode::Mesh(n) => Some(SceneNodeData::Mesh {
                mesh: *index.get(&n.mesh)?,
                name: n.name,
                transform: n.transform.m,
            }),
            SceneNode::Marker(m) => Some(SceneNodeData::Marker {
                name: m.name,
                parent: m.parent,
                position: m.position.to_array(),
                shape: m.shape,
            }),
        })
        .collect();
    EngineToUi::SceneAssembled {
        meshes,
        nodes,
        joints: graph.joints,
    }
}

/// Parse a JSON message, dispatch it, and serialize the response.
pub fn process_json(json_input: &str) -> String {
    let response = match serde_json::from_str::<UiToEngine>(json_input) {
        Ok(msg) => dispatch(msg),
        Err(e) => EngineToUi::Error {
            message: BridgeError::Parse {
                reason: e.to_string(),
            }
            .to_string(),
        },
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        let err = BridgeError::Serialization {
            reason: e.to_string(),
        };
        serde_json::json!({ "type": "Error", "message": err.to_string() }).to_string()
    })
}
