//! # Error Types
//!
//! Structured error types for section_core. These errors are reserved for
//! inputs that cannot be computed with at all: a contour with too few
//! points, non-finite coordinates, parameters outside their physical range.
//!
//! Everything that *can* be computed is: degenerate numeric cases resolve to
//! sentinel results with a logged warning, and structural problems in a
//! profile surface as [`crate::validation::GeometryIssue`] values, never as
//! errors.
//!
//! ## Example
//!
//! ```rust
//! use section_core::errors::{SectionError, SectionResult};
//!
//! fn validate_friction(mu: f64) -> SectionResult<()> {
//!     if !(0.0..=1.5).contains(&mu) {
//!         return Err(SectionError::invalid_input(
//!             "friction_coefficient",
//!             mu.to_string(),
//!             "Friction coefficient must be within [0, 1.5]",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for section_core operations
pub type SectionResult<T> = Result<T, SectionError>;

/// Structured error type for rejected inputs.
///
/// Each variant carries enough context to understand and fix the problem
/// programmatically.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SectionError {
    /// An input value is invalid (out of range, non-finite, too few points)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SectionError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SectionError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        SectionError::MissingField {
            field: field.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SectionError::InvalidInput { .. } => "INVALID_INPUT",
            SectionError::MissingField { .. } => "MISSING_FIELD",
            SectionError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error =
            SectionError::invalid_input("seismic_coefficient", "0.9", "Must be within [0, 0.4]");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SectionError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SectionError::missing_field("main_contour").error_code(),
            "MISSING_FIELD"
        );
        assert_eq!(
            SectionError::invalid_input("x", "NaN", "non-finite").error_code(),
            "INVALID_INPUT"
        );
    }
}
