//! Message binding between a host UI and the photometry/scene core.
//!
//! Hosts post JSON [`UiToEngine`] messages and receive one [`EngineToUi`]
//! response per message. [`dispatch`] is usable natively; on `wasm32` the
//! same path is exported through `wasm_api`.

pub mod assets;
pub mod dispatch;
pub mod messages;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use assets::{AssetDecoder, AssetLoader, AssetMesh};
pub use dispatch::{dispatch, process_json, BridgeError};
pub use messages::{EngineToUi, SceneNodeData, UiToEngine};
