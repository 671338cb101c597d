//! # Validation Engine
//!
//! Three-tier validation of a [`Profile`]: geometric consistency,
//! engineering-standard plausibility and boundary-condition completeness.
//! Each pass runs independently and produces an issue list; the engine
//! scores every pass, combines them into an overall status, and appends all
//! findings to the profile.
//!
//! ## Passes and scoring
//!
//! Each sub-score starts at 1.0 and is penalized per issue by a
//! severity-keyed amount, floored at 0. The geometry and engineering penalty
//! tables intentionally differ and are kept as separate constants; unifying
//! them would silently change pass/fail outcomes. The boundary pass is
//! penalized per missing condition plus per blocking issue.
//!
//! overall = 0.4 × geometry + 0.4 × engineering + 0.2 × boundary
//!
//! ## Status machine
//!
//! Starting from `Pending`, one run resolves to:
//!
//! 1. any Critical issue → `HasIssues`
//! 2. else any Warning or Error → `NeedsAdjustment`
//! 3. else overall ≥ 0.9 → `CalculationReady`
//! 4. else overall ≥ 0.7 → `Validated`
//! 5. else → `Pending`
//!
//! ## Pass isolation
//!
//! A panic inside one pass is caught, converted into a single synthetic
//! Critical issue naming the failed pass, and does not prevent the other
//! passes from running.
//!
//! ## Example
//!
//! ```rust
//! use section_core::geometry::{Contour, Point2D};
//! use section_core::profile::{Profile, SectionGeometry};
//! use section_core::validation;
//!
//! let contour = Contour::new(vec![
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(25.0, 0.0),
//!     Point2D::new(10.0, 50.0),
//! ]).unwrap();
//! let mut profile = Profile::new(SectionGeometry::new(contour));
//!
//! let report = validation::validate(&mut profile);
//! assert_eq!(report.overall_status, profile.status);
//! ```

pub mod boundary_pass;
pub mod engineering_pass;
pub mod geometry_pass;
pub mod issue;

pub use issue::{GeometryIssue, IssueKind, IssueSeverity};

use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Per-pass severity penalty table.
#[derive(Debug, Clone, Copy)]
pub struct PenaltyTable {
    pub critical: f64,
    pub error: f64,
    pub warning: f64,
    pub info: f64,
}

impl PenaltyTable {
    pub fn penalty(&self, severity: IssueSeverity) -> f64 {
        match severity {
            IssueSeverity::Critical => self.critical,
            IssueSeverity::Error => self.error,
            IssueSeverity::Warning => self.warning,
            IssueSeverity::Info => self.info,
        }
    }
}

/// Geometry-pass penalties.
pub const GEOMETRY_PENALTIES: PenaltyTable = PenaltyTable {
    critical: 0.5,
    error: 0.2,
    warning: 0.1,
    info: 0.02,
};

/// Engineering-pass penalties. Deliberately different from the geometry
/// table; keep them separate.
pub const ENGINEERING_PENALTIES: PenaltyTable = PenaltyTable {
    critical: 0.4,
    error: 0.15,
    warning: 0.08,
    info: 0.02,
};

/// Boundary-pass penalty per missing well-known condition.
pub const MISSING_CONDITION_PENALTY: f64 = 0.2;
/// Boundary-pass penalty per issue of Error severity or above.
pub const BOUNDARY_ERROR_PENALTY: f64 = 0.1;

/// Sub-score weights for the overall score.
const GEOMETRY_WEIGHT: f64 = 0.4;
const ENGINEERING_WEIGHT: f64 = 0.4;
const BOUNDARY_WEIGHT: f64 = 0.2;

/// Readiness state of a profile after a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// Not yet validated, or validated with a low overall score
    #[default]
    Pending,
    /// Validated with an acceptable overall score
    Validated,
    /// Clean enough to calculate with
    CalculationReady,
    /// Warnings or errors present, review needed
    NeedsAdjustment,
    /// Critical issues present, blocked
    HasIssues,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ValidationStatus::Pending => "Pending",
            ValidationStatus::Validated => "Validated",
            ValidationStatus::CalculationReady => "Calculation ready",
            ValidationStatus::NeedsAdjustment => "Needs adjustment",
            ValidationStatus::HasIssues => "Has issues",
        };
        write!(f, "{label}")
    }
}

/// Well-known boundary conditions the completeness pass can report missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryConditionKind {
    UpstreamWaterLevel,
    FoundationConstraint,
    GravityLoad,
}

impl BoundaryConditionKind {
    pub fn description(&self) -> &'static str {
        match self {
            BoundaryConditionKind::UpstreamWaterLevel => "Upstream water level",
            BoundaryConditionKind::FoundationConstraint => "Foundation constraint",
            BoundaryConditionKind::GravityLoad => "Gravity load",
        }
    }
}

/// Result of the geometry pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryValidationResult {
    pub issues: Vec<GeometryIssue>,
    /// No issue at Error severity or above
    pub passed: bool,
    /// 0..1 score after penalties
    pub score: f64,
}

/// Result of the engineering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeringValidationResult {
    pub issues: Vec<GeometryIssue>,
    pub passed: bool,
    pub score: f64,
}

/// Result of the boundary-condition pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryValidationResult {
    pub issues: Vec<GeometryIssue>,
    /// Well-known conditions that are absent
    pub missing_conditions: Vec<BoundaryConditionKind>,
    pub passed: bool,
    pub score: f64,
}

/// Composite validation snapshot returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub geometry: GeometryValidationResult,
    pub engineering: EngineeringValidationResult,
    pub boundary: BoundaryValidationResult,
    pub overall_status: ValidationStatus,
    pub overall_score: f64,
    pub generated_at: DateTime<Utc>,
}

/// Run all three validation passes on a profile.
///
/// Appends every finding to the profile's issue list and updates its status.
/// The run does not clear previous issues; callers re-validating after edits
/// should call [`Profile::clear_issues`] first.
pub fn validate(profile: &mut Profile) -> ValidationReport {
    let geometry_issues = run_isolated("geometry", || geometry_pass::run(profile));
    let engineering_issues = run_isolated("engineering", || engineering_pass::run(profile));
    let (boundary_issues, missing) =
        run_isolated("boundary condition", || boundary_pass::run(profile));

    let geometry = GeometryValidationResult {
        passed: pass_passed(&geometry_issues),
        score: pass_score(&geometry_issues, &GEOMETRY_PENALTIES),
        issues: geometry_issues,
    };
    let engineering = EngineeringValidationResult {
        passed: pass_passed(&engineering_issues),
        score: pass_score(&engineering_issues, &ENGINEERING_PENALTIES),
        issues: engineering_issues,
    };
    for condition in &missing {
        tracing::warn!("boundary condition not specified: {}", condition.description());
    }
    let boundary = BoundaryValidationResult {
        passed: pass_passed(&boundary_issues),
        score: boundary_score(&boundary_issues, &missing),
        issues: boundary_issues,
        missing_conditions: missing,
    };

    let overall_score = GEOMETRY_WEIGHT * geometry.score
        + ENGINEERING_WEIGHT * engineering.score
        + BOUNDARY_WEIGHT * boundary.score;
    let max_severity = geometry
        .issues
        .iter()
        .chain(&engineering.issues)
        .chain(&boundary.issues)
        .map(|i| i.severity)
        .max();
    let overall_status = resolve_status(max_severity, overall_score);

    for issue in geometry
        .issues
        .iter()
        .chain(&engineering.issues)
        .chain(&boundary.issues)
    {
        profile.add_issue(issue.clone());
    }
    profile.status = overall_status;

    ValidationReport {
        geometry,
        engineering,
        boundary,
        overall_status,
        overall_score,
        generated_at: Utc::now(),
    }
}

/// Run one pass, converting a panic into a single synthetic Critical issue
/// so that the remaining passes still run.
fn run_isolated<R>(pass: &str, f: impl FnOnce() -> R) -> R
where
    R: Default + SyntheticSink,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(pass, "validation pass failed internally");
            let mut fallback = R::default();
            fallback.record_failure(GeometryIssue::new(
                IssueKind::ValidationPassFailure,
                IssueSeverity::Critical,
                format!("The {pass} validation pass failed internally"),
                "Report the failure with the profile that triggered it",
            ));
            fallback
        }
    }
}

/// Attach the synthetic failure issue to whichever result shape the pass
/// returns.
trait SyntheticSink {
    fn record_failure(&mut self, issue: GeometryIssue);
}

impl SyntheticSink for Vec<GeometryIssue> {
    fn record_failure(&mut self, issue: GeometryIssue) {
        self.push(issue);
    }
}

impl SyntheticSink for (Vec<GeometryIssue>, Vec<BoundaryConditionKind>) {
    fn record_failure(&mut self, issue: GeometryIssue) {
        self.0.push(issue);
    }
}

fn pass_passed(issues: &[GeometryIssue]) -> bool {
    issues.iter().all(|i| i.severity < IssueSeverity::Error)
}

fn pass_score(issues: &[GeometryIssue], table: &PenaltyTable) -> f64 {
    let penalty: f64 = issues.iter().map(|i| table.penalty(i.severity)).sum();
    (1.0 - penalty).max(0.0)
}

fn boundary_score(issues: &[GeometryIssue], missing: &[BoundaryConditionKind]) -> f64 {
    let blocking = issues
        .iter()
        .filter(|i| i.severity >= IssueSeverity::Error)
        .count();
    let penalty = MISSING_CONDITION_PENALTY * missing.len() as f64
        + BOUNDARY_ERROR_PENALTY * blocking as f64;
    (1.0 - penalty).max(0.0)
}

fn resolve_status(max_severity: Option<IssueSeverity>, overall_score: f64) -> ValidationStatus {
    match max_severity {
        Some(s) if s >= IssueSeverity::Critical => ValidationStatus::HasIssues,
        Some(s) if s >= IssueSeverity::Warning => ValidationStatus::NeedsAdjustment,
        _ if overall_score >= 0.9 => ValidationStatus::CalculationReady,
        _ if overall_score >= 0.7 => ValidationStatus::Validated,
        _ => ValidationStatus::Pending,
    }
}
