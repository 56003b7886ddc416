use serde::{Deserialize, Serialize};

/// Tuning knobs for scene assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Marker diameter/edge length in scene units when an LEO gives no dimensions.
    pub default_marker_size: f64,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            default_marker_size: 0.05,
        }
    }
}
