//! # Section Geometry
//!
//! 2D primitives and closed-form polygon mathematics for cross-section
//! analysis.
//!
//! - [`point`] - Point, vector and bounding-box value types
//! - [`contour`] - Ordered, implicitly closed polygon boundary
//! - [`properties`] - Area, centroid, widths and second moments

pub mod contour;
pub mod point;
pub mod properties;

pub use contour::{Contour, CLOSURE_TOLERANCE_M};
pub use point::{BoundingBox, Point2D, Vector2D};
pub use properties::GeometricProperties;
