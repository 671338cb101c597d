//! # Geometric Property Calculator
//!
//! Closed-form polygon properties over a [`Contour`]: area (shoelace),
//! centroid, bounding dimensions, base/top widths and second moments of
//! area. All functions are pure; degenerate inputs (zero area) resolve to
//! well-defined fallback values with a logged warning rather than errors.
//!
//! ## Example
//!
//! ```rust
//! use section_core::geometry::{Contour, Point2D};
//!
//! let rect = Contour::new(vec![
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(4.0, 0.0),
//!     Point2D::new(4.0, 2.0),
//!     Point2D::new(0.0, 2.0),
//! ]).unwrap();
//!
//! assert_eq!(rect.area(), 8.0);
//! let c = rect.centroid();
//! assert!((c.x - 2.0).abs() < 1e-9 && (c.y - 1.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geometry::{BoundingBox, Contour, Point2D};
use crate::profile::SectionGeometry;

/// Y-tolerance for collecting the base/top point clusters (m).
const WIDTH_CLUSTER_TOLERANCE_M: f64 = 1e-6;

impl Contour {
    /// Signed polygon area (positive for counter-clockwise winding).
    ///
    /// The sign is needed by [`Contour::centroid`]; most callers want
    /// [`Contour::area`].
    pub fn signed_area(&self) -> f64 {
        let sum: f64 = self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum();
        sum / 2.0
    }

    /// Polygon area by the shoelace formula (m²), always non-negative.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Polygon centroid.
    ///
    /// Edge-accumulated first moments divided by 6 × *signed* area; using the
    /// absolute area here would flip the centroid for clockwise contours.
    /// A zero-area contour has no defined centroid and falls back to the
    /// vertex average.
    pub fn centroid(&self) -> Point2D {
        let signed = self.signed_area();
        if signed.abs() < 1e-12 {
            warn!("centroid requested for zero-area contour, using vertex average");
            let n = self.len() as f64;
            let (sx, sy) = self
                .points()
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            return Point2D::new(sx / n, sy / n);
        }
        let (mut cx, mut cy) = (0.0, 0.0);
        for (a, b) in self.edges() {
            let cross = a.x * b.y - b.x * a.y;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        Point2D::new(cx / (6.0 * signed), cy / (6.0 * signed))
    }

    /// Axis-aligned bounding box of all contour points.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::of(self.points())
    }

    /// Width of the point cluster at the contour's minimum y (the base).
    ///
    /// A single base point yields width zero.
    pub fn base_width(&self) -> f64 {
        self.cluster_width(self.bounding_box().min_y)
    }

    /// Width of the point cluster at the contour's maximum y (the crest).
    pub fn top_width(&self) -> f64 {
        self.cluster_width(self.bounding_box().max_y)
    }

    fn cluster_width(&self, level_y: f64) -> f64 {
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in self.points() {
            if (p.y - level_y).abs() < WIDTH_CLUSTER_TOLERANCE_M {
                min_x = min_x.min(p.x);
                max_x = max_x.max(p.x);
            }
        }
        if max_x > min_x {
            max_x - min_x
        } else {
            0.0
        }
    }

    /// Second moments of area about the coordinate axes: (Ixx, Iyy, Ixy).
    ///
    /// Edge-accumulated polygon moment integrals, divided by 12 (Ixx, Iyy)
    /// and 24 (Ixy); reported as absolute values (m⁴).
    pub fn second_moments(&self) -> (f64, f64, f64) {
        let (mut ixx, mut iyy, mut ixy) = (0.0, 0.0, 0.0);
        for (a, b) in self.edges() {
            let cross = a.x * b.y - b.x * a.y;
            ixx += (a.y * a.y + a.y * b.y + b.y * b.y) * cross;
            iyy += (a.x * a.x + a.x * b.x + b.x * b.x) * cross;
            ixy += (a.x * b.y + 2.0 * a.x * a.y + 2.0 * b.x * b.y + b.x * a.y) * cross;
        }
        ((ixx / 12.0).abs(), (iyy / 12.0).abs(), (ixy / 24.0).abs())
    }
}

/// Derived geometric properties of a section, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometricProperties {
    /// Net cross-section area: main contour minus holes (m²)
    pub area_m2: f64,
    /// Centroid of the main contour
    pub centroid: Point2D,
    /// Bounding box of the main contour
    pub bounding_box: BoundingBox,
    /// Overall width (m)
    pub width_m: f64,
    /// Overall height (m)
    pub height_m: f64,
    /// Width of the base point cluster (m)
    pub base_width_m: f64,
    /// Width of the crest point cluster (m)
    pub top_width_m: f64,
    /// Second moment about the x axis (m⁴)
    pub ixx_m4: f64,
    /// Second moment about the y axis (m⁴)
    pub iyy_m4: f64,
    /// Product moment of area (m⁴)
    pub ixy_m4: f64,
}

impl GeometricProperties {
    /// Compute all properties of a section geometry.
    ///
    /// Net area subtracts every hole contour from the main contour; the
    /// remaining properties are those of the main contour alone.
    pub fn of(geometry: &SectionGeometry) -> Self {
        let main = &geometry.main_contour;
        let hole_area: f64 = geometry.holes.iter().map(Contour::area).sum();
        let bbox = main.bounding_box();
        let (ixx, iyy, ixy) = main.second_moments();
        GeometricProperties {
            area_m2: main.area() - hole_area,
            centroid: main.centroid(),
            bounding_box: bbox,
            width_m: bbox.width(),
            height_m: bbox.height(),
            base_width_m: main.base_width(),
            top_width_m: main.top_width(),
            ixx_m4: ixx,
            iyy_m4: iyy,
            ixy_m4: ixy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: f64, h: f64) -> Contour {
        Contour::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(w, 0.0),
            Point2D::new(w, h),
            Point2D::new(0.0, h),
        ])
        .unwrap()
    }

    /// Trapezoidal dam section used across the calculation tests.
    fn trapezoid() -> Contour {
        Contour::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 50.0),
            Point2D::new(10.0, 50.0),
            Point2D::new(15.0, 40.0),
            Point2D::new(20.0, 20.0),
            Point2D::new(25.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rectangle_area_exact() {
        assert_eq!(rect(4.0, 2.0).area(), 8.0);
    }

    #[test]
    fn test_rectangle_centroid() {
        let c = rect(4.0, 2.0).centroid();
        assert!((c.x - 2.0).abs() < 1e-9);
        assert!((c.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_winding_independent() {
        // Clockwise winding (negative signed area) must give the same
        // centroid because the division preserves the area sign.
        let cw = Contour::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 2.0),
            Point2D::new(4.0, 2.0),
            Point2D::new(4.0, 0.0),
        ])
        .unwrap();
        assert!(cw.signed_area() < 0.0);
        let c = cw.centroid();
        assert!((c.x - 2.0).abs() < 1e-9);
        assert!((c.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_trapezoid_area() {
        assert!((trapezoid().area() - 925.0).abs() < 1e-9);
    }

    #[test]
    fn test_trapezoid_centroid() {
        let c = trapezoid().centroid();
        assert!((c.x - 53_750.0 / 5_550.0).abs() < 1e-9);
        assert!((c.y - 121_500.0 / 5_550.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_and_top_width() {
        let t = trapezoid();
        assert!((t.base_width() - 25.0).abs() < 1e-12);
        assert!((t.top_width() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_base_point_width_zero() {
        let triangle = Contour::new(vec![
            Point2D::new(5.0, 0.0),
            Point2D::new(10.0, 8.0),
            Point2D::new(0.0, 8.0),
        ])
        .unwrap();
        assert_eq!(triangle.base_width(), 0.0);
        assert_eq!(triangle.top_width(), 10.0);
    }

    #[test]
    fn test_rectangle_second_moments() {
        // Rectangle about the origin axes: Ixx = w·h³/3, Iyy = h·w³/3,
        // Ixy = w²·h²/4.
        let (ixx, iyy, ixy) = rect(4.0, 2.0).second_moments();
        assert!((ixx - 4.0 * 8.0 / 3.0).abs() < 1e-9);
        assert!((iyy - 2.0 * 64.0 / 3.0).abs() < 1e-9);
        assert!((ixy - 16.0 * 4.0 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_area_centroid_fallback() {
        let degenerate = Contour::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 2.0),
        ])
        .unwrap();
        let c = degenerate.centroid();
        assert!((c.x - 1.0).abs() < 1e-12);
        assert!((c.y - 1.0).abs() < 1e-12);
    }
}
