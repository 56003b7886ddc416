//! Polar and Cartesian intensity diagrams.
//!
//! [`render`] turns a dataset into a [`DiagramGeometry`]: an ordered list of
//! drawing primitives plus a `no_data` flag. Nothing here fails; empty or
//! truncated tables degrade to a grid-only placeholder or shorter curves.

pub mod cartesian;
pub mod polar;
pub mod primitives;
pub mod svg;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use luminaire_types::{format_degrees, PhotometricDataset};

use crate::config::DiagramConfig;
use crate::intensity::{expected_len, gamma_angle_at, is_truncated, IntensityTable};
use crate::symmetry::active_plane_range;

pub use primitives::{Color, Fill, Point2, Primitive, TextAnchor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramMode {
    Polar,
    Cartesian,
}

/// A legend row: curve color and the plane pair it shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    /// 0-based C-plane index the curve was drawn from.
    pub plane: usize,
}

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramGeometry {
    pub mode: DiagramMode,
    pub width: f64,
    pub height: f64,
    pub background: Color,
    /// Set when the dataset had no intensities or gamma angles.
    pub no_data: bool,
    pub legend: Vec<LegendEntry>,
    pub primitives: Vec<Primitive>,
}

impl DiagramGeometry {
    fn new(mode: DiagramMode, width: f64, height: f64, config: &DiagramConfig) -> Self {
        Self {
            mode,
            width,
            height,
            background: config.palette.background,
            no_data: false,
            legend: Vec::new(),
            primitives: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Point lists of all curve paths, in drawing order.
    pub fn curves(&self) -> Vec<&[Point2]> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Path { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.primitives.iter().filter_map(Primitive::text).collect()
    }

    /// Replace curve content with the placeholder notice.
    pub(crate) fn mark_no_data(&mut self, config: &DiagramConfig) {
        self.no_data = true;
        self.push(Primitive::Text {
            position: Point2::new(self.width / 2.0, self.height / 2.0),
            text: "No photometric data".to_string(),
            size: config.font_size * 1.2,
            color: config.palette.text,
            anchor: TextAnchor::Middle,
        });
    }
}

/// Render with the default configuration.
pub fn render(
    dataset: &PhotometricDataset,
    mode: DiagramMode,
    width: f64,
    height: f64,
) -> DiagramGeometry {
    render_with(dataset, mode, width, height, &DiagramConfig::default())
}

#[instrument(skip(dataset, config), fields(luminaire = %dataset.luminaire_name))]
pub fn render_with(
    dataset: &PhotometricDataset,
    mode: DiagramMode,
    width: f64,
    height: f64,
    config: &DiagramConfig,
) -> DiagramGeometry {
    if is_truncated(dataset) {
        warn!(
            stored = dataset.intensities.len(),
            expected = expected_len(dataset),
            "intensity table is truncated"
        );
    }
    let range = active_plane_range(dataset.symmetry, dataset.c_plane_count);
    if range.mc2 > dataset.c_plane_count {
        warn!(
            symmetry = dataset.symmetry,
            mc1 = range.mc1,
            mc2 = range.mc2,
            planes = dataset.c_plane_count,
            "active plane range exceeds the C-plane count"
        );
    }
    let geometry = match mode {
        DiagramMode::Polar => polar::render_polar(dataset, width, height, config),
        DiagramMode::Cartesian => cartesian::render_cartesian(dataset, width, height, config),
    };
    info!(
        no_data = geometry.no_data,
        curves = geometry.legend.len(),
        primitives = geometry.primitives.len(),
        "diagram rendered"
    );
    geometry
}

/// One plotted sample: gamma angle in degrees and intensity scaled to `[.., 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Sample {
    pub gamma: f64,
    pub normalized: f64,
}

/// `value / max(max_intensity, epsilon)`, capped at 1.
pub fn normalize(value: f64, max_intensity: f64, epsilon: f64) -> f64 {
    (value / max_intensity.max(epsilon)).min(1.0)
}

/// Samples of the stored part of `plane`.
pub(crate) fn sample_plane(
    dataset: &PhotometricDataset,
    plane: usize,
    config: &DiagramConfig,
) -> Vec<Sample> {
    let table = IntensityTable::new(dataset);
    (0..table.available_in_plane(plane))
        .map(|i| Sample {
            gamma: gamma_angle_at(dataset, i),
            normalized: normalize(table.at(plane, i), dataset.max_intensity, config.epsilon),
        })
        .collect()
}

/// Plane drawn as the second curve, if the symmetry leaves more than one plane.
///
/// Prefers the plane whose C-angle is within tolerance of 90 degrees, then
/// falls back to a quarter of the active plane count.
pub fn secondary_plane(dataset: &PhotometricDataset, config: &DiagramConfig) -> Option<usize> {
    let active = active_plane_range(dataset.symmetry, dataset.c_plane_count).count();
    if active <= 1 {
        return None;
    }
    let matched = dataset
        .c_angles
        .iter()
        .position(|c| (c - 90.0).abs() <= config.secondary_match_tolerance);
    let plane = matched.unwrap_or(active / 4);
    debug!(plane, matched = matched.is_some(), active, "selected secondary plane");
    Some(plane)
}

/// `C0-C180` style label for the plane and its opposite half.
pub fn plane_pair_label(dataset: &PhotometricDataset, plane: usize) -> String {
    match dataset.c_angles.get(plane) {
        Some(angle) => format!(
            "C{}-C{}",
            format_degrees(*angle),
            format_degrees((angle + 180.0).rem_euclid(360.0))
        ),
        None => dataset.c_plane_label(plane),
    }
}

/// The curves to draw: `(plane, samples, color)` for the primary and optional secondary plane.
pub(crate) fn curve_planes(
    dataset: &PhotometricDataset,
    config: &DiagramConfig,
) -> Vec<(usize, Vec<Sample>, Color)> {
    let mut curves = Vec::with_capacity(2);
    let primary = sample_plane(dataset, 0, config);
    if !primary.is_empty() {
        curves.push((0, primary, config.palette.primary));
    }
    if let Some(plane) = secondary_plane(dataset, config) {
        let samples = sample_plane(dataset, plane, config);
        if samples.is_empty() {
            debug!(plane, "secondary plane has no stored intensities");
        } else {
            curves.push((plane, samples, config.palette.secondary));
        }
    }
    curves
}

/// Draw the legend block in the top-left corner and record its entries.
pub(crate) fn push_legend(
    geometry: &mut DiagramGeometry,
    dataset: &PhotometricDataset,
    entries: Vec<LegendEntry>,
    config: &DiagramConfig,
) {
    let x = 10.0;
    let mut y = 16.0;
    let line_height = config.font_size + 4.0;
    for entry in &entries {
        geometry.push(Primitive::Line {
            from: Point2::new(x, y - 4.0),
            to: Point2::new(x + 18.0, y - 4.0),
            stroke: entry.color,
            stroke_width: config.curve_stroke_width,
            dashed: false,
        });
        geometry.push(Primitive::Text {
            position: Point2::new(x + 24.0, y),
            text: entry.label.clone(),
            size: config.font_size,
            color: config.palette.text,
            anchor: TextAnchor::Start,
        });
        y += line_height;
    }
    geometry.push(Primitive::Text {
        position: Point2::new(x, y),
        text: format!("Imax = {:.0} cd", dataset.max_intensity),
        size: config.font_size,
        color: config.palette.text,
        anchor: TextAnchor::Start,
    });
    geometry.legend = entries;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(symmetry: i32, c_angles: Vec<f64>) -> PhotometricDataset {
        let planes = c_angles.len();
        PhotometricDataset {
            symmetry,
            c_plane_count: planes,
            gamma_count: 3,
            c_angles,
            gamma_angles: vec![0.0, 45.0, 90.0],
            intensities: vec![100.0; planes * 3],
            max_intensity: 100.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_guards_zero_max() {
        assert_eq!(normalize(5.0, 10.0, 1e-9), 0.5);
        assert_eq!(normalize(50.0, 10.0, 1e-9), 1.0);
        assert_eq!(normalize(0.0, 0.0, 1e-9), 0.0);
        assert_eq!(normalize(1.0, 0.0, 1e-9), 1.0);
    }

    #[test]
    fn test_secondary_prefers_c90() {
        let angles: Vec<f64> = (0..24).map(|i| i as f64 * 15.0).collect();
        let ds = dataset(0, angles);
        assert_eq!(secondary_plane(&ds, &DiagramConfig::default()), Some(6));
    }

    #[test]
    fn test_secondary_tolerance_window() {
        let ds = dataset(0, vec![0.0, 40.0, 89.2, 130.0]);
        assert_eq!(secondary_plane(&ds, &DiagramConfig::default()), Some(2));
        let ds = dataset(0, vec![0.0, 40.0, 88.5, 130.0]);
        // 4 active planes, no match: 4 / 4.
        assert_eq!(secondary_plane(&ds, &DiagramConfig::default()), Some(1));
    }

    #[test]
    fn test_no_secondary_for_rotational_symmetry() {
        let ds = dataset(1, vec![0.0, 90.0, 180.0, 270.0]);
        assert_eq!(secondary_plane(&ds, &DiagramConfig::default()), None);
    }

    #[test]
    fn test_render_survives_huge_plane_count() {
        let mut ds = dataset(3, vec![0.0, 90.0]);
        ds.c_plane_count = usize::MAX;
        ds.gamma_count = 4;
        ds.gamma_angles = vec![0.0, 30.0, 60.0, 90.0];
        ds.intensities = vec![100.0; 8];
        let range = active_plane_range(3, usize::MAX);
        assert_eq!(range.mc2, usize::MAX);
        assert!(range.count() > 1);
        for mode in [DiagramMode::Polar, DiagramMode::Cartesian] {
            let g = render(&ds, mode, 400.0, 400.0);
            assert!(!g.no_data);
            assert!(!g.curves().is_empty());
        }
    }

    #[test]
    fn test_plane_pair_label() {
        let ds = dataset(0, vec![0.0, 90.0, 270.0]);
        assert_eq!(plane_pair_label(&ds, 0), "C0-C180");
        assert_eq!(plane_pair_label(&ds, 1), "C90-C270");
        assert_eq!(plane_pair_label(&ds, 2), "C270-C90");
        assert_eq!(plane_pair_label(&ds, 9), "C#9");
    }
}
