//! Axis-aligned bounding boxes over mesh positions.

use std::fmt;

use nalgebra::Point3;

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

impl Aabb3 {
    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Bounds of a set of positions. Empty if the iterator yields nothing.
    pub fn from_points(points: impl IntoIterator<Item = [f32; 3]>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.include_point(p);
        }
        aabb
    }

    /// True until at least one point has been included.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: [f32; 3]) {
        self.min.x = self.min.x.min(p[0]);
        self.min.y = self.min.y.min(p[1]);
        self.min.z = self.min.z.min(p[2]);
        self.max.x = self.max.x.max(p[0]);
        self.max.y = self.max.y.max(p[1]);
        self.max.z = self.max.z.max(p[2]);
    }

    /// Smallest AABB containing both boxes.
    pub fn union(&self, other: &Aabb3) -> Aabb3 {
        Aabb3 {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Aabb3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min ({} {} {}) max ({} {} {})",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty() {
        let aabb = Aabb3::empty();
        assert!(aabb.is_empty());
        assert!(Aabb3::from_points(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_negative_coordinates_reach_max() {
        let aabb = Aabb3::from_points([[-3.0, -2.0, -1.0], [-5.0, -4.0, -0.5]]);
        assert!(!aabb.is_empty());
        assert_relative_eq!(aabb.max.x, -3.0);
        assert_relative_eq!(aabb.max.y, -2.0);
        assert_relative_eq!(aabb.max.z, -0.5);
        assert_relative_eq!(aabb.min.x, -5.0);
        assert_relative_eq!(aabb.min.y, -4.0);
        assert_relative_eq!(aabb.min.z, -1.0);
    }

    #[test]
    fn test_single_point_is_degenerate_box() {
        let aabb = Aabb3::from_points([[1.0, 2.0, 3.0]]);
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, aabb.max);
    }

    #[test]
    fn test_union() {
        let a = Aabb3::from_points([[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
        let b = Aabb3::from_points([[-1.0, 0.5, 2.0]]);
        let u = a.union(&b);
        assert_eq!(u.min, Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(u.max, Point3::new(1.0, 1.0, 2.0));
        assert_eq!(Aabb3::empty().union(&a), a);
    }
}
