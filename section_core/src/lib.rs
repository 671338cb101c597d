//! # section_core - Cross-Section Stability & Validation Engine
//!
//! `section_core` is the computational heart of a gravity-structure design
//! tool: given a planar cross-section polygon (projected from a 3D model by
//! an external host), it computes geometric properties, hydrostatic, uplift
//! and seismic loads, sliding and overturning safety factors, and runs a
//! three-tier validation producing a severity-scored issue list and a
//! readiness state.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results; the
//!   only mutation is the issue list the validation engine appends to a
//!   profile
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Issues, not exceptions**: Structural problems surface as scored,
//!   fixable issues; degenerate numerics resolve to defined sentinels
//! - **No I/O**: Rendering, persistence and host integration live entirely
//!   downstream of the result snapshots
//!
//! ## Quick Start
//!
//! ```rust
//! use section_core::geometry::{Contour, Point2D};
//! use section_core::profile::{Profile, SectionGeometry};
//! use section_core::loads::AnalysisParameters;
//! use section_core::results::AnalysisResult;
//! use section_core::validation;
//!
//! let contour = Contour::new(vec![
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(0.0, 50.0),
//!     Point2D::new(10.0, 50.0),
//!     Point2D::new(25.0, 0.0),
//!     Point2D::new(0.0, 0.0),
//! ]).unwrap();
//! let mut profile = Profile::new(SectionGeometry::new(contour));
//!
//! // Validate, then analyze
//! let report = validation::validate(&mut profile);
//! let params = AnalysisParameters {
//!     upstream_water_level_m: 40.0,
//!     downstream_water_level_m: 5.0,
//!     ..AnalysisParameters::default()
//! };
//! let analysis = AnalysisResult::build(&profile, &params).unwrap();
//! println!("{}", analysis.report);
//! # let _ = report;
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - 2D primitives and polygon property calculations
//! - [`profile`] - Section geometry plus validation/annotation state
//! - [`materials`] - Material properties and zones
//! - [`loads`] - Analysis parameters and load superposition
//! - [`stability`] - Safety factors and stability verdicts
//! - [`validation`] - Three-tier validation engine
//! - [`results`] - Immutable analysis snapshots and report text
//! - [`errors`] - Structured error types

pub mod errors;
pub mod geometry;
pub mod loads;
pub mod materials;
pub mod profile;
pub mod results;
pub mod stability;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use errors::{SectionError, SectionResult};
pub use geometry::{Contour, GeometricProperties, Point2D};
pub use loads::{analyze_loads, AnalysisParameters, LoadAnalysis};
pub use profile::{Profile, SectionGeometry};
pub use results::AnalysisResult;
pub use stability::{evaluate_stability, StabilityResult, INFINITE_SAFETY_FACTOR};
pub use validation::{
    validate, GeometryIssue, IssueKind, IssueSeverity, ValidationReport, ValidationStatus,
};
