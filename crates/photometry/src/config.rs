//! Layout and color configuration for diagram rendering.

use serde::{Deserialize, Serialize};

use crate::diagram::primitives::Color;

/// Colors used by the diagram renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub grid: Color,
    pub axis: Color,
    pub text: Color,
    /// Curve for the first C-plane.
    pub primary: Color,
    /// Curve for the C90 (or fallback) plane.
    pub secondary: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            background: Color::rgb(255, 255, 255),
            grid: Color::rgb(208, 208, 208),
            axis: Color::rgb(96, 96, 96),
            text: Color::rgb(51, 51, 51),
            primary: Color::rgb(31, 119, 180),
            secondary: Color::rgb(214, 39, 40),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::rgb(26, 26, 46),
            grid: Color::rgb(58, 63, 92),
            axis: Color::rgb(90, 96, 128),
            text: Color::rgb(136, 146, 176),
            primary: Color::rgb(79, 195, 247),
            secondary: Color::rgb(255, 107, 107),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

/// Space reserved around the Cartesian plot area, in output units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 55.0,
            right: 20.0,
            top: 30.0,
            bottom: 45.0,
        }
    }
}

/// Configuration controlling diagram layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Floor applied to `max_intensity` before normalizing.
    pub epsilon: f64,
    /// Gap between the outer polar circle and the output edge.
    pub polar_margin: f64,
    pub plot_margins: Margins,
    /// Grid circle radii (polar) and grid line heights (Cartesian) as fractions of full scale.
    pub grid_fractions: Vec<f64>,
    /// Spacing of radial guide lines in degrees.
    pub radial_step_degrees: f64,
    pub font_size: f64,
    /// How far (degrees) a C-angle may sit from 90 and still count as the C90 plane.
    pub secondary_match_tolerance: f64,
    pub curve_stroke_width: f64,
    pub grid_stroke_width: f64,
    /// Opacity of the polar curve fill, 0 disables the fill.
    pub fill_opacity: f64,
    pub palette: Palette,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            polar_margin: 40.0,
            plot_margins: Margins::default(),
            grid_fractions: vec![0.25, 0.5, 0.75, 1.0],
            radial_step_degrees: 30.0,
            font_size: 11.0,
            secondary_match_tolerance: 1.0,
            curve_stroke_width: 2.0,
            grid_stroke_width: 0.5,
            fill_opacity: 0.15,
            palette: Palette::default(),
        }
    }
}

impl DiagramConfig {
    pub fn light() -> Self {
        Self::default()
    }

    /// Dark background, matching the viewer's dark theme.
    pub fn dark() -> Self {
        Self {
            palette: Palette::dark(),
            ..Self::default()
        }
    }
}
