//! # Bounding Box
//!
//! Axis-aligned bounding box used per element and globally across the mesh.
//!
//! The global box is always recomputed by folding per-element boxes from the
//! empty box, never grown incrementally, so it shrinks again when elements
//! move back.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box with min/max corners.
///
/// An *empty* box has `min > max` on every axis and is the identity for
/// [`extend_box`](Self::extend_box); folding any set of boxes starts from it.
///
/// # Example
///
/// ```rust
/// use surface_mesh::bounds::BoundingBox;
/// use glam::DVec3;
///
/// let mut bbox = BoundingBox::empty();
/// bbox.extend_point(DVec3::new(1.0, 2.0, 3.0));
/// bbox.extend_point(DVec3::new(-1.0, 0.0, 0.0));
/// assert!(bbox.contains_point(DVec3::ZERO));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner (smallest x, y, z values).
    pub min: DVec3,
    /// Maximum corner (largest x, y, z values).
    pub max: DVec3,
}

impl BoundingBox {
    /// Creates a box from explicit corners.
    ///
    /// Corners are swapped per axis if supplied out of order.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Creates the empty box (identity for union folds).
    pub const fn empty() -> Self {
        Self {
            min: DVec3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: DVec3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Creates the unbounded box covering all of space.
    ///
    /// Used as the owned region of a serial (single-process) domain.
    pub const fn unbounded() -> Self {
        Self {
            min: DVec3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            max: DVec3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
        }
    }

    /// Creates the tightest box containing all given points.
    pub fn from_points(points: &[DVec3]) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.extend_point(*p);
        }
        bbox
    }

    /// Returns true if the box contains no points (`min > max` on some axis).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grows the box to include a point.
    pub fn extend_point(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grows the box to include another box (union).
    pub fn extend_box(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Returns the union of two boxes.
    pub fn union(&self, other: &BoundingBox) -> Self {
        let mut result = *self;
        result.extend_box(other);
        result
    }

    /// Returns the intersection of two boxes.
    ///
    /// Disjoint boxes intersect to the empty box.
    pub fn intersection(&self, other: &BoundingBox) -> Self {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Self::empty();
        }
        Self { min, max }
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, point: DVec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Returns true if `other` lies entirely within this box.
    ///
    /// The empty box is contained in every box.
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.is_empty() || (self.contains_point(other.min) && self.contains_point(other.max))
    }

    /// Returns the center of the box.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the per-axis extent of the box.
    pub fn extent(&self) -> DVec3 {
        self.max - self.min
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box_is_empty() {
        let bbox = BoundingBox::empty();
        assert!(bbox.is_empty());
        assert!(!bbox.contains_point(DVec3::ZERO));
    }

    #[test]
    fn test_extend_point() {
        let mut bbox = BoundingBox::empty();
        bbox.extend_point(DVec3::new(1.0, -2.0, 3.0));
        bbox.extend_point(DVec3::new(-1.0, 2.0, 0.0));
        assert_eq!(bbox.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.max, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_extend_by_empty_box_is_identity() {
        let mut bbox = BoundingBox::new(DVec3::ZERO, DVec3::ONE);
        let before = bbox;
        bbox.extend_box(&BoundingBox::empty());
        assert_eq!(bbox, before);
    }

    #[test]
    fn test_new_swaps_corners() {
        let bbox = BoundingBox::new(DVec3::new(1.0, 0.0, 5.0), DVec3::new(0.0, 1.0, 2.0));
        assert_eq!(bbox.min, DVec3::new(0.0, 0.0, 2.0));
        assert_eq!(bbox.max, DVec3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn test_intersection_disjoint_is_empty() {
        let a = BoundingBox::new(DVec3::ZERO, DVec3::ONE);
        let b = BoundingBox::new(DVec3::splat(2.0), DVec3::splat(3.0));
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn test_intersection_overlap() {
        let a = BoundingBox::new(DVec3::ZERO, DVec3::splat(2.0));
        let b = BoundingBox::new(DVec3::ONE, DVec3::splat(3.0));
        let i = a.intersection(&b);
        assert_eq!(i.min, DVec3::ONE);
        assert_eq!(i.max, DVec3::splat(2.0));
    }

    #[test]
    fn test_unbounded_contains_everything() {
        let bbox = BoundingBox::unbounded();
        assert!(bbox.contains_point(DVec3::splat(1e300)));
        assert!(bbox.contains_box(&BoundingBox::new(DVec3::ZERO, DVec3::ONE)));
    }

    #[test]
    fn test_contains_box() {
        let outer = BoundingBox::new(DVec3::ZERO, DVec3::splat(10.0));
        let inner = BoundingBox::new(DVec3::ONE, DVec3::splat(2.0));
        assert!(outer.contains_box(&inner));
        assert!(!inner.contains_box(&outer));
        assert!(outer.contains_box(&BoundingBox::empty()));
    }
}
