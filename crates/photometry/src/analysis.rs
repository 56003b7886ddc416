//! Summary figures shown next to the diagrams.
//!
//! These are display helpers computed straight from the stored table; they do
//! not replace a photometric calculation.

use luminaire_types::PhotometricDataset;

use crate::intensity::{gamma_angle_at, IntensityTable};

/// Half-angle used when the first plane has no positive intensity.
const DEFAULT_BEAM_HALF_ANGLE: f64 = 45.0;

/// Largest stored intensity. May differ from the header's `max_intensity`.
pub fn peak_intensity(dataset: &PhotometricDataset) -> f64 {
    IntensityTable::new(dataset).peak()
}

/// Flux leaving the luminaire: lamp flux scaled by the light output ratio.
pub fn luminaire_flux(dataset: &PhotometricDataset) -> f64 {
    dataset.total_lumens * dataset.lorl / 100.0
}

/// Luminous efficacy in lm/W, `None` without a positive wattage.
pub fn efficacy(dataset: &PhotometricDataset) -> Option<f64> {
    (dataset.wattage > 0.0).then(|| luminaire_flux(dataset) / dataset.wattage)
}

/// Gamma angle (degrees) at which plane 0 first drops below half its peak.
///
/// Returns 45 when the plane has no positive value, and the last sampled
/// angle when the intensity never drops that far.
pub fn beam_half_angle(dataset: &PhotometricDataset) -> f64 {
    let table = IntensityTable::new(dataset);
    let available = table.available_in_plane(0);
    let peak = (0..available).map(|g| table.at(0, g)).fold(0.0, f64::max);
    if peak <= 0.0 {
        return DEFAULT_BEAM_HALF_ANGLE;
    }
    let half = peak * 0.5;
    (0..available)
        .find(|&g| table.at(0, g) < half)
        .or(available.checked_sub(1))
        .map_or(90.0, |g| gamma_angle_at(dataset, g))
}

/// Full beam angle, twice [`beam_half_angle`].
pub fn beam_angle(dataset: &PhotometricDataset) -> f64 {
    2.0 * beam_half_angle(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spot() -> PhotometricDataset {
        PhotometricDataset {
            total_lumens: 2000.0,
            lorl: 85.0,
            wattage: 17.0,
            c_plane_count: 1,
            gamma_count: 5,
            gamma_angles: vec![0.0, 10.0, 20.0, 30.0, 40.0],
            intensities: vec![1000.0, 900.0, 600.0, 400.0, 100.0],
            max_intensity: 1200.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_flux_and_efficacy() {
        let ds = spot();
        assert_relative_eq!(luminaire_flux(&ds), 1700.0);
        assert_relative_eq!(efficacy(&ds).unwrap(), 100.0);
        let ds = PhotometricDataset::default();
        assert!(efficacy(&ds).is_none());
    }

    #[test]
    fn test_peak_ignores_header_max() {
        assert_eq!(peak_intensity(&spot()), 1000.0);
    }

    #[test]
    fn test_beam_half_angle() {
        let ds = spot();
        assert_eq!(beam_half_angle(&ds), 30.0);
        assert_eq!(beam_angle(&ds), 60.0);
    }

    #[test]
    fn test_beam_never_drops() {
        let mut ds = spot();
        ds.intensities = vec![100.0; 5];
        assert_eq!(beam_half_angle(&ds), 40.0);
    }

    #[test]
    fn test_beam_without_light() {
        let mut ds = spot();
        ds.intensities = vec![0.0; 5];
        assert_eq!(beam_half_angle(&ds), 45.0);
        ds.intensities.clear();
        assert_eq!(beam_half_angle(&ds), 45.0);
    }
}
