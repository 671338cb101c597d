//! # Contour
//!
//! An ordered polygon boundary in the local section frame. The contour is
//! implicitly closed: the edge from the last point back to the first is part
//! of the polygon whether or not the first point is repeated at the end.
//!
//! Construction enforces the hard invariants (at least three points, finite
//! coordinates). Closure is a *checked* property, not an enforced one: the
//! validation engine reports an open contour as an issue rather than this
//! type refusing to exist.

use serde::{Deserialize, Serialize};

use crate::errors::{SectionError, SectionResult};
use crate::geometry::Point2D;

/// Tolerance for the first ≈ last closure check (m).
pub const CLOSURE_TOLERANCE_M: f64 = 1e-3;

/// Ordered, implicitly closed polygon boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    points: Vec<Point2D>,
}

impl Contour {
    /// Create a contour from an ordered point sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::InvalidInput`] if fewer than three points are
    /// given or any coordinate is non-finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use section_core::geometry::{Contour, Point2D};
    ///
    /// let contour = Contour::new(vec![
    ///     Point2D::new(0.0, 0.0),
    ///     Point2D::new(10.0, 0.0),
    ///     Point2D::new(10.0, 8.0),
    ///     Point2D::new(0.0, 8.0),
    /// ]).unwrap();
    /// assert_eq!(contour.len(), 4);
    /// ```
    pub fn new(points: Vec<Point2D>) -> SectionResult<Self> {
        if points.len() < 3 {
            return Err(SectionError::invalid_input(
                "points",
                points.len().to_string(),
                "A contour requires at least 3 points",
            ));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(SectionError::invalid_input(
                "points",
                format!("({}, {})", bad.x, bad.y),
                "Contour coordinates must be finite",
            ));
        }
        Ok(Contour { points })
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Point2D {
        self.points[0]
    }

    pub fn last(&self) -> Point2D {
        self.points[self.points.len() - 1]
    }

    /// Whether the contour is closed: first ≈ last within
    /// [`CLOSURE_TOLERANCE_M`].
    pub fn is_closed(&self) -> bool {
        self.first().distance_to(&self.last()) < CLOSURE_TOLERANCE_M
    }

    /// Iterate the polygon edges, including the implicit wrap-around edge
    /// from the last point back to the first.
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Shortest distance from `point` to any edge of the contour.
    pub fn distance_to_point(&self, point: &Point2D) -> f64 {
        self.edges()
            .map(|(a, b)| point.distance_to_segment(&a, &b))
            .fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_too_few_points() {
        let result = Contour::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let result = Contour::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(f64::NAN, 0.0),
            Point2D::new(1.0, 1.0),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_closure_check() {
        let open = Contour::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 8.0),
        ])
        .unwrap();
        assert!(!open.is_closed());

        let closed = Contour::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 8.0),
            Point2D::new(0.0, 0.0),
        ])
        .unwrap();
        assert!(closed.is_closed());
    }

    #[test]
    fn test_edges_wrap_around() {
        let contour = Contour::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 3.0),
        ])
        .unwrap();
        let edges: Vec<_> = contour.edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2].0, Point2D::new(4.0, 3.0));
        assert_eq!(edges[2].1, Point2D::new(0.0, 0.0));
    }

    #[test]
    fn test_distance_to_point() {
        let contour = Contour::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ])
        .unwrap();
        let p = Point2D::new(5.0, -2.0);
        assert!((contour.distance_to_point(&p) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let contour = Contour::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 3.0),
        ])
        .unwrap();
        let json = serde_json::to_string(&contour).unwrap();
        let roundtrip: Contour = serde_json::from_str(&json).unwrap();
        assert_eq!(contour, roundtrip);
    }
}
