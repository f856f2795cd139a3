//! Axis-aligned bounding boxes

use crate::foundation::math::{transform_point, Mat4, Vec3};

/// Axis-aligned box given by per-axis extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Box from two corners, normalized so `min <= max` on every axis
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        let mut aabb = Self { min: a, max: b };
        aabb.normalize();
        aabb
    }

    /// Transform both corners by `matrix` and re-normalize
    ///
    /// Only the two stored corners are transformed, so a rotated box yields
    /// the box spanned by those corners rather than the hull of all eight.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self::from_corners(transform_point(matrix, self.min), transform_point(matrix, self.max))
    }

    /// Swap min and max on any axis where they are inverted
    pub fn normalize(&mut self) {
        for axis in 0..3 {
            if self.max[axis] < self.min[axis] {
                std::mem::swap(&mut self.min[axis], &mut self.max[axis]);
            }
        }
    }

    /// Closed interval overlap on all three axes; touching boxes overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (0..3).all(|axis| self.min[axis] <= other.max[axis] && self.max[axis] >= other.min[axis])
    }

    /// Box center
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}
