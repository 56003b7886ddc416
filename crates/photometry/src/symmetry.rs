//! C-plane range resolution for EULUMDAT symmetry codes.

use serde::{Deserialize, Serialize};

/// Symmetry declared by a photometric file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symmetry {
    /// Code 0: every C-plane carries data.
    None,
    /// Code 1: rotationally symmetric about the vertical axis.
    Vertical,
    /// Code 2: mirror about the C0-C180 plane.
    PlaneC0C180,
    /// Code 3: mirror about the C90-C270 plane.
    PlaneC90C270,
    /// Code 4: mirror about both planes.
    BothPlanes,
    /// Anything else. Treated like `None`.
    Unknown(i32),
}

impl Symmetry {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Symmetry::None,
            1 => Symmetry::Vertical,
            2 => Symmetry::PlaneC0C180,
            3 => Symmetry::PlaneC90C270,
            4 => Symmetry::BothPlanes,
            other => Symmetry::Unknown(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Symmetry::None => 0,
            Symmetry::Vertical => 1,
            Symmetry::PlaneC0C180 => 2,
            Symmetry::PlaneC90C270 => 3,
            Symmetry::BothPlanes => 4,
            Symmetry::Unknown(code) => *code,
        }
    }
}

/// 1-based inclusive range of C-planes holding non-redundant data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePlaneRange {
    pub mc1: usize,
    pub mc2: usize,
}

impl ActivePlaneRange {
    pub fn count(&self) -> usize {
        self.mc2.saturating_sub(self.mc1).saturating_add(1)
    }

    /// Range limited to `[1, n_c_planes]`.
    ///
    /// Code 3 can report `mc2` past the last plane (8 planes give 7..=11), so
    /// anything that indexes data goes through this first.
    pub fn clamped(&self, n_c_planes: usize) -> ActivePlaneRange {
        let n = n_c_planes.max(1);
        let mc1 = self.mc1.clamp(1, n);
        let mc2 = self.mc2.clamp(mc1, n);
        ActivePlaneRange { mc1, mc2 }
    }

    /// 0-based plane indices covered by the range, clamped to the stored planes.
    pub fn plane_indices(&self, n_c_planes: usize) -> std::ops::Range<usize> {
        let c = self.clamped(n_c_planes);
        (c.mc1 - 1)..c.mc2
    }
}

/// Compute the active C-plane range for a symmetry code.
///
/// Plane counts below one are clamped to one; no error is raised.
pub fn active_plane_range(symmetry: i32, n_c_planes: usize) -> ActivePlaneRange {
    let n = n_c_planes.max(1);
    let (mc1, mc2) = match Symmetry::from_code(symmetry) {
        Symmetry::None | Symmetry::Unknown(_) => (1, n),
        Symmetry::Vertical => (1, 1),
        Symmetry::PlaneC0C180 => (1, n / 2 + 1),
        Symmetry::PlaneC90C270 => {
            let mc1 = 3 * (n / 4) + 1;
            // Saturates only for plane counts no real file carries.
            (mc1, mc1.saturating_add(n / 2))
        }
        Symmetry::BothPlanes => (1, n / 4 + 1),
    };
    ActivePlaneRange { mc1, mc2 }
}

/// Number of planes carrying data for a symmetry code.
pub fn active_plane_count(symmetry: i32, n_c_planes: usize) -> usize {
    active_plane_range(symmetry, n_c_planes).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_symmetry_full_range() {
        assert_eq!(active_plane_range(0, 24), ActivePlaneRange { mc1: 1, mc2: 24 });
    }

    #[test]
    fn test_vertical_symmetry_single_plane() {
        for n in [1, 4, 24, 360] {
            assert_eq!(active_plane_range(1, n), ActivePlaneRange { mc1: 1, mc2: 1 });
        }
    }

    #[test]
    fn test_c0_c180_half_range() {
        let r = active_plane_range(2, 24);
        assert_eq!((r.mc1, r.mc2), (1, 13));
        assert_eq!(r.count(), 13);
    }

    #[test]
    fn test_c90_c270_formula_kept() {
        let r = active_plane_range(3, 24);
        assert_eq!((r.mc1, r.mc2), (19, 31));
        let r = active_plane_range(3, 8);
        assert_eq!((r.mc1, r.mc2), (7, 11));
        assert_eq!(r.clamped(8), ActivePlaneRange { mc1: 7, mc2: 8 });
        assert_eq!(r.plane_indices(8), 6..8);
    }

    #[test]
    fn test_huge_plane_count_saturates() {
        let r = active_plane_range(3, usize::MAX);
        assert_eq!(r.mc1, 3 * (usize::MAX / 4) + 1);
        assert_eq!(r.mc2, usize::MAX);
        assert_eq!(r.clamped(usize::MAX), r);
        assert_eq!(active_plane_range(0, usize::MAX).count(), usize::MAX);
    }

    #[test]
    fn test_quad_symmetry() {
        assert_eq!(active_plane_range(4, 36), ActivePlaneRange { mc1: 1, mc2: 10 });
    }

    #[test]
    fn test_unknown_code_full_range() {
        assert_eq!(active_plane_range(99, 12), ActivePlaneRange { mc1: 1, mc2: 12 });
        assert_eq!(active_plane_range(-1, 0), ActivePlaneRange { mc1: 1, mc2: 1 });
        assert_eq!(Symmetry::from_code(99), Symmetry::Unknown(99));
        assert_eq!(Symmetry::from_code(99).code(), 99);
    }

    #[test]
    fn test_zero_planes_clamped() {
        for code in 0..=4 {
            let r = active_plane_range(code, 0);
            assert!(r.mc1 >= 1 && r.mc2 >= r.mc1, "code {code}: {r:?}");
        }
    }
}
