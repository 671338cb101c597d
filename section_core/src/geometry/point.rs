//! # Planar Primitives
//!
//! Point, vector and bounding-box value types for cross-section geometry.
//! All coordinates are metres in the local 2D frame of the extracted section
//! (x horizontal, upstream to downstream; y vertical, positive up).
//!
//! ## Example
//!
//! ```rust
//! use section_core::geometry::Point2D;
//!
//! let heel = Point2D::new(0.0, 0.0);
//! let toe = Point2D::new(25.0, 0.0);
//! assert_eq!(heel.distance_to(&toe), 25.0);
//! ```

use serde::{Deserialize, Serialize};

/// Immutable 2D point in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// Horizontal coordinate (m)
    pub x: f64,
    /// Vertical coordinate (m)
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Shortest distance from this point to the segment `a`-`b`.
    ///
    /// Degenerate segments (a ≈ b) fall back to point distance.
    pub fn distance_to_segment(&self, a: &Point2D, b: &Point2D) -> f64 {
        let edge = Vector2D::between(a, b);
        let len_sq = edge.dot(&edge);
        if len_sq < 1e-12 {
            return self.distance_to(a);
        }
        let to_self = Vector2D::between(a, self);
        let t = (to_self.dot(&edge) / len_sq).clamp(0.0, 1.0);
        let closest = Point2D::new(a.x + t * edge.dx, a.y + t * edge.dy);
        self.distance_to(&closest)
    }
}

/// 2D displacement vector, used for edge arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub dx: f64,
    pub dy: f64,
}

impl Vector2D {
    pub fn new(dx: f64, dy: f64) -> Self {
        Vector2D { dx, dy }
    }

    /// Vector from `a` to `b`.
    pub fn between(a: &Point2D, b: &Point2D) -> Self {
        Vector2D {
            dx: b.x - a.x,
            dy: b.y - a.y,
        }
    }

    /// Scalar cross product (z-component of the 3D cross product).
    pub fn cross(&self, other: &Vector2D) -> f64 {
        self.dx * other.dy - self.dy * other.dx
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.dx * other.dx + self.dy * other.dy
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounding box of a non-empty point slice.
    ///
    /// Callers always have at least three points (contour invariant), so an
    /// empty slice indicates a logic error upstream and yields a degenerate
    /// zero box at the origin.
    pub fn of(points: &[Point2D]) -> Self {
        let seed = points.first().copied().unwrap_or_default();
        let mut bbox = BoundingBox {
            min_x: seed.x,
            min_y: seed.y,
            max_x: seed.x,
            max_y: seed.y,
        };
        for p in points {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        bbox
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether this box overlaps another (shared boundary counts as overlap).
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, 0.0);
        let p = Point2D::new(5.0, 3.0);
        assert!((p.distance_to_segment(&a, &b) - 3.0).abs() < 1e-12);

        // Beyond the end: distance to the endpoint
        let q = Point2D::new(13.0, 4.0);
        assert!((q.distance_to_segment(&a, &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_cross_product_sign() {
        let right = Vector2D::new(1.0, 0.0);
        let up = Vector2D::new(0.0, 1.0);
        assert!(right.cross(&up) > 0.0);
        assert!(up.cross(&right) < 0.0);
    }

    #[test]
    fn test_bounding_box() {
        let points = vec![
            Point2D::new(1.0, 2.0),
            Point2D::new(-3.0, 5.0),
            Point2D::new(4.0, -1.0),
        ];
        let bbox = BoundingBox::of(&points);
        assert_eq!(bbox.min_x, -3.0);
        assert_eq!(bbox.max_x, 4.0);
        assert_eq!(bbox.width(), 7.0);
        assert_eq!(bbox.height(), 6.0);
    }

    #[test]
    fn test_bbox_overlap() {
        let a = BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 5.0,
            max_y: 5.0,
        };
        let b = BoundingBox {
            min_x: 4.0,
            min_y: 4.0,
            max_x: 8.0,
            max_y: 8.0,
        };
        let c = BoundingBox {
            min_x: 6.0,
            min_y: 0.0,
            max_x: 9.0,
            max_y: 3.0,
        };
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
