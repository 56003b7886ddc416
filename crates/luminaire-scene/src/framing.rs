//! Initial camera placement for a 3D preview.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point3d, Vec3};
use crate::transform::BoundingBox;

/// Eye position looking at the scene center from above and to the side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraFit {
    pub target: Point3d,
    pub eye: Point3d,
    pub distance: f64,
}

impl CameraFit {
    /// Fit a camera with vertical field of view `fov_degrees` around `bbox`.
    ///
    /// Returns `None` for an empty box or a field of view outside `(0, 180)`.
    /// A box that is a single point gets a unit-sized view.
    pub fn for_bounds(bbox: &BoundingBox, fov_degrees: f64) -> Option<Self> {
        if !bbox.is_valid() || !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return None;
        }
        let target = bbox.center();
        let max_dim = match bbox.size().max_component() {
            d if d > 0.0 => d,
            _ => 1.0,
        };
        let distance = max_dim / (2.0 * (fov_degrees.to_radians() / 2.0).tan());
        let eye = target + Vec3::new(0.7 * distance, 0.7 * distance, distance);
        Some(Self {
            target,
            eye,
            distance,
        })
    }
}
