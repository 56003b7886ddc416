//! Plane-major addressing over the flat intensity array.

use luminaire_types::PhotometricDataset;

use crate::symmetry::active_plane_range;

/// Read-only `(plane, gamma) -> cd` view of a dataset's intensities.
///
/// Lookups never fail: anything outside the populated range reads as `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct IntensityTable<'a> {
    values: &'a [f64],
    plane_count: usize,
    gamma_count: usize,
}

impl<'a> IntensityTable<'a> {
    pub fn new(dataset: &'a PhotometricDataset) -> Self {
        Self {
            values: &dataset.intensities,
            plane_count: dataset.c_plane_count,
            gamma_count: dataset.gamma_count,
        }
    }

    pub fn plane_count(&self) -> usize {
        self.plane_count
    }

    pub fn gamma_count(&self) -> usize {
        self.gamma_count
    }

    fn index(&self, plane: usize, gamma: usize) -> Option<usize> {
        if gamma >= self.gamma_count {
            return None;
        }
        let idx = plane.checked_mul(self.gamma_count)?.checked_add(gamma)?;
        (idx < self.values.len()).then_some(idx)
    }

    pub fn at(&self, plane: usize, gamma: usize) -> f64 {
        self.index(plane, gamma).map_or(0.0, |i| self.values[i])
    }

    /// The full gamma row of `plane`, or an empty slice if the plane is
    /// outside `[0, plane_count)` or not completely stored.
    pub fn plane(&self, plane: usize) -> &'a [f64] {
        if plane >= self.plane_count || self.gamma_count == 0 {
            return &[];
        }
        let Some(start) = plane.checked_mul(self.gamma_count) else {
            return &[];
        };
        let Some(end) = start.checked_add(self.gamma_count) else {
            return &[];
        };
        self.values.get(start..end).unwrap_or(&[])
    }

    /// How many leading gamma values of `plane` are stored.
    pub fn available_in_plane(&self, plane: usize) -> usize {
        let start = plane.saturating_mul(self.gamma_count);
        self.values.len().saturating_sub(start).min(self.gamma_count)
    }

    /// Largest stored value, `0.0` for an empty table.
    pub fn peak(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Intensity at `(plane, gamma)`, `0.0` when outside the populated range.
pub fn intensity_at(dataset: &PhotometricDataset, plane: usize, gamma: usize) -> f64 {
    IntensityTable::new(dataset).at(plane, gamma)
}

/// The `gamma_count` values of `plane`, empty when out of range.
pub fn plane_slice(dataset: &PhotometricDataset, plane: usize) -> &[f64] {
    IntensityTable::new(dataset).plane(plane)
}

/// Number of values a complete file stores: active planes times gamma count.
///
/// Symmetric files leave the redundant planes out, so this is usually less
/// than [`PhotometricDataset::nominal_len`].
pub fn expected_len(dataset: &PhotometricDataset) -> usize {
    if dataset.c_plane_count == 0 {
        return 0;
    }
    active_plane_range(dataset.symmetry, dataset.c_plane_count)
        .clamped(dataset.c_plane_count)
        .count()
        .saturating_mul(dataset.gamma_count)
}

/// True when fewer intensities are stored than the active planes need.
pub fn is_truncated(dataset: &PhotometricDataset) -> bool {
    dataset.intensities.len() < expected_len(dataset)
}

/// Gamma angle of sample `index` in degrees.
///
/// Uses the stored angle when present, otherwise spreads `gamma_count`
/// samples uniformly over 0..=180.
pub fn gamma_angle_at(dataset: &PhotometricDataset, index: usize) -> f64 {
    match dataset.gamma_angles.get(index) {
        Some(angle) => *angle,
        None if dataset.gamma_count > 1 => {
            index as f64 * 180.0 / (dataset.gamma_count - 1) as f64
        }
        None => 0.0,
    }
}
