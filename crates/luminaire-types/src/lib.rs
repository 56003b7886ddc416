//! Input data model shared by the photometry and scene crates.
//!
//! Both types are produced by an upstream parser (EULUMDAT/IES text files and
//! L3D bundles respectively) and only ever read by this workspace.

pub mod l3d;
pub mod photometry;

pub use l3d::*;
pub use photometry::*;
