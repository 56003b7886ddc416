//! Cartesian intensity plot: gamma on X, percent of `max_intensity` on Y.

use luminaire_types::{format_degrees, PhotometricDataset};

use super::{
    curve_planes, plane_pair_label, push_legend, DiagramGeometry, DiagramMode, LegendEntry,
    Point2, Primitive, TextAnchor,
};
use crate::config::DiagramConfig;

/// Number of vertical grid lines across the gamma range.
const GAMMA_GRID_LINES: usize = 7;

/// Right end of the X axis.
///
/// The last stored gamma angle when it is positive, otherwise 180 degrees
/// (90 when the file has fewer than two gamma samples).
pub fn max_gamma(dataset: &PhotometricDataset) -> f64 {
    match dataset.gamma_angles.last() {
        Some(&last) if last.is_finite() && last > 0.0 => last,
        _ if dataset.gamma_count > 1 => 180.0,
        _ => 90.0,
    }
}

/// Maps gamma/normalized values into the plot rectangle.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    max_gamma: f64,
}

impl PlotArea {
    fn x(&self, gamma: f64) -> f64 {
        self.left + gamma / self.max_gamma * self.width
    }

    fn y(&self, normalized: f64) -> f64 {
        self.top + (1.0 - normalized) * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

pub(crate) fn render_cartesian(
    dataset: &PhotometricDataset,
    width: f64,
    height: f64,
    config: &DiagramConfig,
) -> DiagramGeometry {
    let mut geometry = DiagramGeometry::new(DiagramMode::Cartesian, width, height, config);
    let m = config.plot_margins;
    let area = PlotArea {
        left: m.left,
        top: m.top,
        width: (width - m.left - m.right).max(0.0),
        height: (height - m.top - m.bottom).max(0.0),
        max_gamma: max_gamma(dataset),
    };

    push_grid(&mut geometry, &area, config);

    if dataset.is_empty() || dataset.gamma_count == 0 {
        geometry.mark_no_data(config);
        return geometry;
    }

    let mut legend = Vec::new();
    for (plane, samples, color) in curve_planes(dataset, config) {
        let points = samples
            .iter()
            .map(|s| Point2::new(area.x(s.gamma), area.y(s.normalized)))
            .collect();
        geometry.push(Primitive::Path {
            points,
            closed: false,
            fill: None,
            stroke: color,
            stroke_width: config.curve_stroke_width,
        });
        legend.push(LegendEntry {
            label: plane_pair_label(dataset, plane),
            color,
            plane,
        });
    }

    push_legend(&mut geometry, dataset, legend, config);
    geometry
}

fn push_grid(geometry: &mut DiagramGeometry, area: &PlotArea, config: &DiagramConfig) {
    let palette = &config.palette;
    let font = config.font_size;

    // Horizontal lines every 25 percent, including the baseline.
    let levels = std::iter::once(0.0).chain(config.grid_fractions.iter().copied());
    for level in levels {
        let y = area.y(level);
        geometry.push(Primitive::Line {
            from: Point2::new(area.left, y),
            to: Point2::new(area.right(), y),
            stroke: palette.grid,
            stroke_width: config.grid_stroke_width,
            dashed: false,
        });
        geometry.push(Primitive::Text {
            position: Point2::new(area.left - 6.0, y + font / 3.0),
            text: format!("{:.0}%", level * 100.0),
            size: font,
            color: palette.text,
            anchor: TextAnchor::End,
        });
    }

    let step = area.max_gamma / (GAMMA_GRID_LINES - 1) as f64;
    for k in 0..GAMMA_GRID_LINES {
        let gamma = step * k as f64;
        let x = area.x(gamma);
        geometry.push(Primitive::Line {
            from: Point2::new(x, area.top),
            to: Point2::new(x, area.bottom()),
            stroke: palette.grid,
            stroke_width: config.grid_stroke_width,
            dashed: false,
        });
        geometry.push(Primitive::Text {
            position: Point2::new(x, area.bottom() + font + 4.0),
            text: format!("{}°", format_degrees(gamma)),
            size: font,
            color: palette.text,
            anchor: TextAnchor::Middle,
        });
    }

    // Axes over the grid.
    geometry.push(Primitive::Line {
        from: Point2::new(area.left, area.bottom()),
        to: Point2::new(area.right(), area.bottom()),
        stroke: palette.axis,
        stroke_width: 1.0,
        dashed: false,
    });
    geometry.push(Primitive::Line {
        from: Point2::new(area.left, area.top),
        to: Point2::new(area.left, area.bottom()),
        stroke: palette.axis,
        stroke_width: 1.0,
        dashed: false,
    });
    geometry.push(Primitive::Text {
        position: Point2::new(area.left + area.width / 2.0, area.bottom() + 2.0 * font + 10.0),
        text: "γ [°]".to_string(),
        size: font,
        color: palette.text,
        anchor: TextAnchor::Middle,
    });
    geometry.push(Primitive::Text {
        position: Point2::new(area.right(), area.top - 8.0),
        text: "I / Imax [%]".to_string(),
        size: font,
        color: palette.text,
        anchor: TextAnchor::End,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn linear() -> PhotometricDataset {
        PhotometricDataset {
            symmetry: 4,
            c_plane_count: 4,
            gamma_count: 3,
            c_angles: vec![0.0, 30.0, 60.0, 90.0],
            gamma_angles: vec![0.0, 45.0, 90.0],
            intensities: vec![
                200.0, 100.0, 0.0, //
                200.0, 120.0, 10.0, //
                200.0, 140.0, 20.0, //
                200.0, 160.0, 40.0,
            ],
            max_intensity: 200.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_max_gamma_fallbacks() {
        let mut ds = linear();
        assert_eq!(max_gamma(&ds), 90.0);
        ds.gamma_angles = vec![0.0, 0.0, 0.0];
        assert_eq!(max_gamma(&ds), 180.0);
        ds.gamma_angles.clear();
        ds.gamma_count = 1;
        assert_eq!(max_gamma(&ds), 90.0);
    }

    #[test]
    fn test_curves_are_open_polylines() {
        let g = render_cartesian(&linear(), 500.0, 300.0, &DiagramConfig::default());
        assert!(!g.no_data);
        // Symmetry 4 with 4 planes: 2 active planes, C90 found at index 3.
        assert_eq!(g.legend.len(), 2);
        assert_eq!(g.legend[1].plane, 3);
        for p in &g.primitives {
            if let Primitive::Path { closed, fill, points, .. } = p {
                assert!(!closed);
                assert!(fill.is_none());
                assert_eq!(points.len(), 3);
            }
        }
    }

    #[test]
    fn test_point_mapping() {
        let cfg = DiagramConfig::default();
        let g = render_cartesian(&linear(), 500.0, 300.0, &cfg);
        let primary = g.curves()[0];
        let m = cfg.plot_margins;
        let plot_w = 500.0 - m.left - m.right;
        let plot_h = 300.0 - m.top - m.bottom;
        // gamma 0 at full intensity: top-left corner.
        assert_abs_diff_eq!(primary[0].x, m.left, epsilon = 1e-12);
        assert_abs_diff_eq!(primary[0].y, m.top, epsilon = 1e-12);
        // gamma 45 at 50 %.
        assert_abs_diff_eq!(primary[1].x, m.left + plot_w / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(primary[1].y, m.top + plot_h / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_grid_labels() {
        let g = render_cartesian(&linear(), 500.0, 300.0, &DiagramConfig::default());
        let texts = g.texts();
        for label in ["0%", "25%", "50%", "75%", "100%", "0°", "15°", "45°", "90°"] {
            assert!(texts.contains(&label), "missing {label}: {texts:?}");
        }
    }

    #[test]
    fn test_empty_cartesian() {
        let ds = PhotometricDataset {
            gamma_count: 19,
            ..Default::default()
        };
        let g = render_cartesian(&ds, 500.0, 300.0, &DiagramConfig::default());
        assert!(g.no_data);
        assert!(g.curves().is_empty());
        assert!(g.texts().contains(&"180°"));
    }
}
