//! Polar intensity plot.
//!
//! Gamma 0 points up. Each plane is drawn forward over its stored gamma
//! samples, then mirrored to `360 - gamma` in reverse so the far half of the
//! plane appears even when the file only stores one side.

use luminaire_types::PhotometricDataset;

use super::{
    curve_planes, plane_pair_label, push_legend, DiagramGeometry, DiagramMode, Fill, LegendEntry,
    Point2, Primitive, Sample, TextAnchor,
};
use crate::config::DiagramConfig;

/// Screen position of a sample on the polar plot.
pub fn polar_point(center: Point2, radius_max: f64, gamma_degrees: f64, normalized: f64) -> Point2 {
    let r = radius_max * normalized;
    let theta = gamma_degrees * std::f64::consts::PI / 180.0;
    Point2::new(center.x + r * theta.sin(), center.y - r * theta.cos())
}

/// Forward samples followed by their mirror image in reverse order, closed
/// so the last point equals the first.
pub(crate) fn mirrored_closed_path(
    samples: &[Sample],
    center: Point2,
    radius_max: f64,
) -> Vec<Point2> {
    let mut points: Vec<Point2> = samples
        .iter()
        .map(|s| polar_point(center, radius_max, s.gamma, s.normalized))
        .collect();
    points.extend(
        samples
            .iter()
            .rev()
            .map(|s| polar_point(center, radius_max, 360.0 - s.gamma, s.normalized)),
    );

    let Some(&first) = points.first() else {
        return points;
    };
    match points.last_mut() {
        // Gamma 0 mirrors onto 360 and lands on the start up to rounding.
        Some(last) if last.distance_to(&first) < 1e-9 => *last = first,
        _ => points.push(first),
    }
    points
}

pub(crate) fn render_polar(
    dataset: &PhotometricDataset,
    width: f64,
    height: f64,
    config: &DiagramConfig,
) -> DiagramGeometry {
    let mut geometry = DiagramGeometry::new(DiagramMode::Polar, width, height, config);
    let center = Point2::new(width / 2.0, height / 2.0);
    let radius_max = (width.min(height) / 2.0 - config.polar_margin).max(0.0);

    push_grid(&mut geometry, dataset, center, radius_max, config);

    if dataset.is_empty() || dataset.gamma_count == 0 {
        geometry.mark_no_data(config);
        return geometry;
    }

    let mut legend = Vec::new();
    for (plane, samples, color) in curve_planes(dataset, config) {
        let fill = (config.fill_opacity > 0.0).then_some(Fill {
            color,
            opacity: config.fill_opacity,
        });
        geometry.push(Primitive::Path {
            points: mirrored_closed_path(&samples, center, radius_max),
            closed: true,
            fill,
            stroke: color,
            stroke_width: config.curve_stroke_width,
        });
        legend.push(LegendEntry {
            label: plane_pair_label(dataset, plane),
            color,
            plane,
        });
    }
    if legend.is_empty() {
        // Intensities exist but none of them belong to plane 0.
        geometry.mark_no_data(config);
        return geometry;
    }

    push_legend(&mut geometry, dataset, legend, config);
    geometry
}

fn push_grid(
    geometry: &mut DiagramGeometry,
    dataset: &PhotometricDataset,
    center: Point2,
    radius_max: f64,
    config: &DiagramConfig,
) {
    let palette = &config.palette;

    for fraction in &config.grid_fractions {
        geometry.push(Primitive::Circle {
            center,
            radius: radius_max * fraction,
            stroke: palette.grid,
            stroke_width: config.grid_stroke_width,
        });
    }

    if config.radial_step_degrees > 0.0 {
        let steps = (360.0 / config.radial_step_degrees).round() as usize;
        for k in 0..steps {
            let angle = k as f64 * config.radial_step_degrees;
            geometry.push(Primitive::Line {
                from: center,
                to: polar_point(center, radius_max, angle, 1.0),
                stroke: palette.grid,
                stroke_width: config.grid_stroke_width,
                dashed: true,
            });
        }
    }

    // Degree labels on one side, 0 to 180 in 30 degree steps.
    let label_radius = radius_max + config.font_size * 1.2;
    for angle in (0..=180).step_by(30) {
        let mut position = polar_point(center, label_radius, angle as f64, 1.0);
        position.y += config.font_size / 3.0;
        geometry.push(Primitive::Text {
            position,
            text: format!("{angle}°"),
            size: config.font_size,
            color: palette.text,
            anchor: TextAnchor::Middle,
        });
    }

    // Intensity values along the upward axis.
    for fraction in &config.grid_fractions {
        geometry.push(Primitive::Text {
            position: Point2::new(center.x + 3.0, center.y - radius_max * fraction - 2.0),
            text: format!("{:.0}", dataset.max_intensity * fraction),
            size: config.font_size * 0.85,
            color: palette.text,
            anchor: TextAnchor::Start,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn downlight() -> PhotometricDataset {
        PhotometricDataset {
            luminaire_name: "Downlight".into(),
            symmetry: 1,
            c_plane_count: 1,
            gamma_count: 7,
            c_angles: vec![0.0],
            gamma_angles: vec![0.0, 15.0, 30.0, 45.0, 60.0, 75.0, 90.0],
            intensities: vec![400.0, 380.0, 320.0, 220.0, 110.0, 30.0, 0.0],
            max_intensity: 400.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_polar_point_orientation() {
        let c = Point2::new(100.0, 100.0);
        let up = polar_point(c, 50.0, 0.0, 1.0);
        assert_abs_diff_eq!(up.x, 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(up.y, 50.0, epsilon = 1e-12);
        let right = polar_point(c, 50.0, 90.0, 0.5);
        assert_abs_diff_eq!(right.x, 125.0, epsilon = 1e-12);
        assert_abs_diff_eq!(right.y, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mirrored_path_closed() {
        let g = render_polar(&downlight(), 400.0, 400.0, &DiagramConfig::default());
        assert!(!g.no_data);
        let curves = g.curves();
        assert_eq!(curves.len(), 1);
        let pts = curves[0];
        assert_eq!(pts.first(), pts.last());
        // 7 forward + 7 mirrored, last snapped onto the first.
        assert_eq!(pts.len(), 14);
    }

    #[test]
    fn test_mirror_reflects_x() {
        let g = render_polar(&downlight(), 400.0, 400.0, &DiagramConfig::default());
        let pts = g.curves()[0];
        // Forward sample 3 (45 deg) mirrors to index 10 (315 deg).
        assert_abs_diff_eq!(pts[3].x - 200.0, -(pts[10].x - 200.0), epsilon = 1e-9);
        assert_abs_diff_eq!(pts[3].y, pts[10].y, epsilon = 1e-9);
    }

    #[test]
    fn test_nonzero_start_gets_closing_vertex() {
        let mut ds = downlight();
        ds.gamma_angles = vec![5.0, 15.0, 30.0, 45.0, 60.0, 75.0, 90.0];
        let g = render_polar(&ds, 400.0, 400.0, &DiagramConfig::default());
        let pts = g.curves()[0];
        assert_eq!(pts.len(), 15);
        assert_eq!(pts.first(), pts.last());
    }

    #[test]
    fn test_grid_counts() {
        let g = render_polar(&downlight(), 400.0, 400.0, &DiagramConfig::default());
        let circles = g
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { .. }))
            .count();
        assert_eq!(circles, 4);
        let radial = g
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { dashed: true, .. }))
            .count();
        assert_eq!(radial, 12);
        let texts = g.texts();
        for label in ["0°", "90°", "180°", "Imax = 400 cd", "C0-C180"] {
            assert!(texts.contains(&label), "missing {label}: {texts:?}");
        }
    }

    #[test]
    fn test_empty_dataset_grid_only() {
        let ds = PhotometricDataset::default();
        let g = render_polar(&ds, 300.0, 300.0, &DiagramConfig::default());
        assert!(g.no_data);
        assert!(g.curves().is_empty());
        assert!(g.legend.is_empty());
        assert!(g.texts().contains(&"No photometric data"));
    }
}
