use serde::{Deserialize, Serialize};

use crate::geometry::{Point3d, Vec3};

/// A 4x4 affine transformation matrix stored in column-major order.
///
/// This is the layout L3D parts carry: columns occupy `m[0..4]`, `m[4..8]`,
/// `m[8..12]` and `m[12..16]`, with the translation in `m[12..15]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Column-major 4x4 matrix entries.
    pub m: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { m }
    }

    /// Wrap a column-major matrix as-is.
    pub fn from_column_major(m: [f64; 16]) -> Self {
        Self { m }
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            dx,  dy,  dz,  1.0,
        ];
        Self { m }
    }

    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        #[rustfmt::skip]
        let m = [
            sx,  0.0, 0.0, 0.0,
            0.0, sy,  0.0, 0.0,
            0.0, 0.0, sz,  0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { m }
    }

    /// Rotation around the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        #[rustfmt::skip]
        let m = [
            c,   s,   0.0, 0.0,
            -s,  c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { m }
    }

    /// Matrix element access (row, col), 0-indexed.
    fn at(&self, row: usize, col: usize) -> f64 {
        self.m[col * 4 + row]
    }

    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m[12], self.m[13], self.m[14])
    }

    /// Transform a point (applies translation).
    pub fn transform_point(&self, p: &Point3d) -> Point3d {
        let x = self.at(0, 0) * p.x + self.at(0, 1) * p.y + self.at(0, 2) * p.z + self.at(0, 3);
        let y = self.at(1, 0) * p.x + self.at(1, 1) * p.y + self.at(1, 2) * p.z + self.at(1, 3);
        let z = self.at(2, 0) * p.x + self.at(2, 1) * p.y + self.at(2, 2) * p.z + self.at(2, 3);
        Point3d::new(x, y, z)
    }

    /// Transform a vector (no translation).
    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        let x = self.at(0, 0) * v.x + self.at(0, 1) * v.y + self.at(0, 2) * v.z;
        let y = self.at(1, 0) * v.x + self.at(1, 1) * v.y + self.at(1, 2) * v.z;
        let z = self.at(2, 0) * v.x + self.at(2, 1) * v.y + self.at(2, 2) * v.z;
        Vec3::new(x, y, z)
    }

    /// Compose two transforms: self * other.
    pub fn then(&self, other: &Transform) -> Transform {
        let mut result = [0.0f64; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * other.at(k, col);
                }
                result[col * 4 + row] = sum;
            }
        }
        Transform { m: result }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3d::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point3d]) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn expand_to_include(&mut self, p: &Point3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut bb = *self;
        bb.expand_to_include(&other.min);
        bb.expand_to_include(&other.max);
        bb
    }

    pub fn corners(&self) -> [Point3d; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3d::new(a.x, a.y, a.z),
            Point3d::new(b.x, a.y, a.z),
            Point3d::new(b.x, b.y, a.z),
            Point3d::new(a.x, b.y, a.z),
            Point3d::new(a.x, a.y, b.z),
            Point3d::new(b.x, a.y, b.z),
            Point3d::new(b.x, b.y, b.z),
            Point3d::new(a.x, b.y, b.z),
        ]
    }

    /// Box around the transformed corners of this box.
    pub fn transformed(&self, t: &Transform) -> Self {
        let corners = self.corners().map(|c| t.transform_point(&c));
        Self::from_points(&corners)
    }

    pub fn center(&self) -> Point3d {
        self.min.midpoint(&self.max)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        let p = Point3d::new(1.0, 2.0, 3.0);
        let result = t.transform_point(&p);
        assert!((result.x - 1.0).abs() < 1e-12);
        assert!((result.y - 2.0).abs() < 1e-12);
        assert!((result.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_translation_lives_in_last_column() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        assert_eq!(&t.m[12..15], &[10.0, 20.0, 30.0]);
        assert_eq!(t.translation_part(), Vec3::new(10.0, 20.0, 30.0));
        let result = t.transform_point(&Point3d::new(1.0, 2.0, 3.0));
        assert!((result.x - 11.0).abs() < 1e-12);
        assert!((result.y - 22.0).abs() < 1e-12);
        assert!((result.z - 33.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_z_90() {
        let t = Transform::rotation_z(FRAC_PI_2);
        let result = t.transform_point(&Point3d::new(1.0, 0.0, 0.0));
        assert!((result.x).abs() < 1e-12);
        assert!((result.y - 1.0).abs() < 1e-12);
        // Vectors ignore the translation column.
        let moved = Transform::translation(5.0, 5.0, 5.0).transform_vector(&Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(moved, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_compose_transforms() {
        let t1 = Transform::translation(1.0, 0.0, 0.0);
        let t2 = Transform::scaling(2.0, 2.0, 2.0);
        // Scale first, then translate.
        let combined = t1.then(&t2);
        let result = combined.transform_point(&Point3d::new(1.0, 1.0, 1.0));
        assert!((result.x - 3.0).abs() < 1e-12);
        assert!((result.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box_transformed() {
        let bb = BoundingBox::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(2.0, 1.0, 1.0));
        let rotated = bb.transformed(&Transform::rotation_z(FRAC_PI_2));
        assert!((rotated.min.x - (-1.0)).abs() < 1e-12);
        assert!((rotated.max.y - 2.0).abs() < 1e-12);
        assert!(BoundingBox::empty().union(&bb).is_valid());
        assert!(!BoundingBox::empty().is_valid());
    }
}
