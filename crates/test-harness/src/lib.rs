//! Test harness for the photometry and scene crates.
//!
//! Provides fixture datasets and scenes, instrumented mesh loaders, and
//! text reports for checking diagram and scene output.
//!
//! # Key Components
//!
//! - [`helpers`]: fixtures, [`CountingLoader`], a small text mesh decoder
//! - [`assertions`]: assertion helpers returning [`HarnessError`]
//! - [`report`]: structured text descriptions of diagrams and scenes

pub mod assertions;
pub mod helpers;
pub mod report;

pub use helpers::{CountingLoader, HarnessError, TextMeshDecoder};
pub use report::{DiagramReport, SceneReport};
