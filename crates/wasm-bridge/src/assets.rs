//! Mesh assets shipped inside an `AssembleScene` message.
//!
//! The bridge does not decode meshes itself; the host's 3D engine does that.
//! Assembly here resolves each geometry to an [`AssetMesh`] reference so the
//! host knows which file to decode and where to place it.

use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use luminaire_scene::{DecodeError, MeshDecoder, MeshLoader};
use luminaire_types::GeometryDefinition;

use crate::dispatch::BridgeError;

/// Reference to a mesh file the host should decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMesh {
    pub geometry_id: String,
    pub filename: String,
    pub byte_len: usize,
}

/// Asset bytes keyed by bundle filename.
#[derive(Debug, Default)]
pub struct AssetLoader {
    files: HashMap<String, Vec<u8>>,
}

impl AssetLoader {
    /// Decode every base64 entry up front; one bad entry fails the message.
    pub fn from_base64(assets: &HashMap<String, String>) -> Result<Self, BridgeError> {
        let files = assets
            .iter()
            .map(|(filename, data)| {
                STANDARD
                    .decode(data.trim())
                    .map(|bytes| (filename.clone(), bytes))
                    .map_err(|e| BridgeError::Asset {
                        filename: filename.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl MeshLoader for AssetLoader {
    type Bytes = Vec<u8>;

    fn load(&mut self, geometry: &GeometryDefinition) -> Option<Vec<u8>> {
        self.files.get(&geometry.filename).cloned()
    }
}

/// Accepts any non-empty buffer as a reference to itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetDecoder;

impl MeshDecoder for AssetDecoder {
    type Mesh = AssetMesh;

    fn decode(&self, geometry: &GeometryDefinition, bytes: &[u8]) -> Result<AssetMesh, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty {
                filename: geometry.filename.clone(),
            });
        }
        Ok(AssetMesh {
            geometry_id: geometry.id.clone(),
            filename: geometry.filename.clone(),
            byte_len: bytes.len(),
        })
    }
}
