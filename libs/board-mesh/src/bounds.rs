//! # Bounding Box
//!
//! Axis-aligned bounds over a point set. Shared by pose normalization and
//! board layout checks.

use config::constants::approx_zero;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
///
/// Always non-empty: construction from an empty point set yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl BoundingBox {
    /// Creates a box from two corners, reordering components as needed.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Computes the bounds of a point set.
    ///
    /// Returns `None` for an empty set or when any coordinate is not finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use board_mesh::BoundingBox;
    /// use glam::DVec3;
    ///
    /// let bbox = BoundingBox::from_points(&[DVec3::ZERO, DVec3::new(2.0, -1.0, 3.0)]).unwrap();
    /// assert_eq!(bbox.min, DVec3::new(0.0, -1.0, 0.0));
    /// assert_eq!(bbox.size(), DVec3::new(2.0, 1.0, 3.0));
    /// ```
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        Self::from_point_iter(points.iter().copied())
    }

    /// Computes the bounds of an iterator of points.
    pub fn from_point_iter(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;

        for p in iter {
            min = min.min(p);
            max = max.max(p);
        }

        if min.is_finite() && max.is_finite() {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Extent along each axis.
    #[inline]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// True when every extent is within `EPSILON` of zero (a single point).
    pub fn is_point(&self) -> bool {
        approx_zero(self.size().max_element())
    }

    /// Returns the smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True when `point` lies inside or on the box.
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Axis-aligned bounds in the board plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2 {
    /// Minimum corner
    pub min: DVec2,
    /// Maximum corner
    pub max: DVec2,
}

impl Rect2 {
    /// Rectangle of the given size centered at the origin.
    pub fn centered(width: f64, height: f64) -> Self {
        let half = DVec2::new(width, height) * 0.5;
        Self {
            min: -half,
            max: half,
        }
    }

    /// True when the disc `(center, radius)` lies strictly inside.
    pub fn contains_disc(&self, center: DVec2, radius: f64) -> bool {
        center.x - radius > self.min.x
            && center.x + radius < self.max.x
            && center.y - radius > self.min.y
            && center.y + radius < self.max.y
    }

    /// True when the disc `(center, radius)` touches the rectangle at all.
    pub fn intersects_disc(&self, center: DVec2, radius: f64) -> bool {
        let nearest = center.clamp(self.min, self.max);
        nearest.distance_squared(center) <= radius * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_empty_is_none() {
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_from_points_rejects_nan() {
        let points = [DVec3::ZERO, DVec3::new(f64::NAN, 0.0, 0.0)];
        assert!(BoundingBox::from_points(&points).is_none());
    }

    #[test]
    fn test_size_and_center() {
        let bbox = BoundingBox::new(DVec3::new(4.0, 5.0, 6.0), DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.size(), DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(bbox.center(), DVec3::new(1.5, 1.5, 1.5));
        assert!(!bbox.is_point());
    }

    #[test]
    fn test_single_point_box() {
        let bbox = BoundingBox::from_points(&[DVec3::ONE]).unwrap();
        assert!(bbox.is_point());
        assert!(bbox.contains(DVec3::ONE));
    }

    #[test]
    fn test_union() {
        let a = BoundingBox::new(DVec3::ZERO, DVec3::ONE);
        let b = BoundingBox::new(DVec3::splat(2.0), DVec3::splat(3.0));
        let u = a.union(&b);
        assert_eq!(u.min, DVec3::ZERO);
        assert_eq!(u.max, DVec3::splat(3.0));
    }

    #[test]
    fn test_rect_disc_containment() {
        let rect = Rect2::centered(10.0, 10.0);
        assert!(rect.contains_disc(DVec2::ZERO, 1.0));
        assert!(!rect.contains_disc(DVec2::new(4.5, 0.0), 1.0));
        assert!(rect.intersects_disc(DVec2::new(5.5, 0.0), 1.0));
        assert!(!rect.intersects_disc(DVec2::new(20.0, 0.0), 1.0));
    }
}
