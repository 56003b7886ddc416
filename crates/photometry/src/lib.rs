pub mod analysis;
pub mod config;
pub mod diagram;
pub mod intensity;
pub mod symmetry;

// Re-export the entry points at crate root for convenience.
pub use config::{DiagramConfig, Palette};
pub use diagram::svg::to_svg;
pub use diagram::{render, DiagramGeometry, DiagramMode, Primitive};
pub use intensity::{
    expected_len, gamma_angle_at, intensity_at, is_truncated, plane_slice, IntensityTable,
};
pub use symmetry::{active_plane_range, ActivePlaneRange, Symmetry};
