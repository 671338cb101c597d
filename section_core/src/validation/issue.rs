//! # Validation Issues
//!
//! Issue severity, issue kinds and the issue record itself. Issues are the
//! designed *output* of the validation engine, never an error channel: they
//! are appended to a profile, carry actionable suggested-fix text, and are
//! immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;

/// Issue severity with an explicit total order:
/// Info < Warning < Error < Critical.
///
/// The ordering is defined by [`IssueSeverity::rank`] rather than by
/// declaration order, so reordering variants cannot silently change
/// comparison semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueSeverity {
    /// Informational, never blocks anything
    Info,
    /// Should be reviewed, does not fail a pass
    Warning,
    /// Fails the pass it occurs in
    Error,
    /// Blocks downstream use of the profile
    Critical,
}

impl IssueSeverity {
    /// Numeric rank defining the total order.
    pub fn rank(&self) -> u8 {
        match self {
            IssueSeverity::Info => 0,
            IssueSeverity::Warning => 1,
            IssueSeverity::Error => 2,
            IssueSeverity::Critical => 3,
        }
    }
}

impl Ord for IssueSeverity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for IssueSeverity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IssueSeverity::Info => "Info",
            IssueSeverity::Warning => "Warning",
            IssueSeverity::Error => "Error",
            IssueSeverity::Critical => "Critical",
        };
        write!(f, "{label}")
    }
}

/// What a validation check found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    // Geometry pass
    /// Main contour endpoints do not meet within tolerance
    OpenContour,
    /// Section height outside the plausible range
    ImplausibleHeight,
    /// Width/height aspect ratio outside the plausible range
    ImplausibleAspectRatio,
    /// Upstream face slope outside the plausible range
    ImplausibleUpstreamSlope,
    /// Downstream face slope outside the plausible range
    ImplausibleDownstreamSlope,
    /// A contour segment is implausibly long
    OversizedSegment,
    /// A contour segment is shorter than the modelling tolerance
    UndersizedSegment,
    /// Two non-adjacent contour edges cross
    SelfIntersection,

    // Engineering pass
    /// No foundation contour recorded
    MissingFoundation,
    /// Foundation endpoints are not attached to the main contour
    DetachedFoundation,
    /// No drainage feature recorded
    MissingDrainage,
    /// No material zones recorded
    NoMaterialZones,
    /// Two material zones overlap
    OverlappingZones,
    /// Height to base-width ratio above the gravity-section limit
    ExcessiveSlenderness,
    /// Crest narrower than the access minimum
    NarrowCrest,

    // Boundary-condition pass
    /// Upstream water level missing or non-positive
    MissingUpstreamLevel,
    /// Downstream water level below zero
    NegativeDownstreamLevel,
    /// Upstream level at or below downstream level
    ContradictoryWaterLevels,
    /// No foundation-constraint entry recorded
    MissingFoundationConstraint,
    /// A material zone has non-positive density or elastic modulus
    InvalidZoneMaterial,

    /// A validation pass failed internally (synthetic Critical issue)
    ValidationPassFailure,
}

impl IssueKind {
    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::OpenContour => "Open contour",
            IssueKind::ImplausibleHeight => "Implausible height",
            IssueKind::ImplausibleAspectRatio => "Implausible aspect ratio",
            IssueKind::ImplausibleUpstreamSlope => "Implausible upstream slope",
            IssueKind::ImplausibleDownstreamSlope => "Implausible downstream slope",
            IssueKind::OversizedSegment => "Oversized segment",
            IssueKind::UndersizedSegment => "Undersized segment",
            IssueKind::SelfIntersection => "Self-intersection",
            IssueKind::MissingFoundation => "Missing foundation",
            IssueKind::DetachedFoundation => "Detached foundation",
            IssueKind::MissingDrainage => "Missing drainage",
            IssueKind::NoMaterialZones => "No material zones",
            IssueKind::OverlappingZones => "Overlapping zones",
            IssueKind::ExcessiveSlenderness => "Excessive slenderness",
            IssueKind::NarrowCrest => "Narrow crest",
            IssueKind::MissingUpstreamLevel => "Missing upstream level",
            IssueKind::NegativeDownstreamLevel => "Negative downstream level",
            IssueKind::ContradictoryWaterLevels => "Contradictory water levels",
            IssueKind::MissingFoundationConstraint => "Missing foundation constraint",
            IssueKind::InvalidZoneMaterial => "Invalid zone material",
            IssueKind::ValidationPassFailure => "Validation pass failure",
        }
    }
}

/// One finding of the validation engine. Immutable once created; profiles
/// only append issues or clear the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryIssue {
    /// What was found
    pub kind: IssueKind,

    /// How serious it is
    pub severity: IssueSeverity,

    /// Human-readable description of the finding
    pub description: String,

    /// Where on the section it was found, if localizable
    pub location: Option<Point2D>,

    /// Actionable suggestion for resolving the issue
    pub suggested_fix: String,

    /// Whether an automatic fix is available downstream
    pub auto_fixable: bool,

    /// When the issue was discovered
    pub detected_at: DateTime<Utc>,
}

impl GeometryIssue {
    pub fn new(
        kind: IssueKind,
        severity: IssueSeverity,
        description: impl Into<String>,
        suggested_fix: impl Into<String>,
    ) -> Self {
        GeometryIssue {
            kind,
            severity,
            description: description.into(),
            location: None,
            suggested_fix: suggested_fix.into(),
            auto_fixable: false,
            detected_at: Utc::now(),
        }
    }

    /// Attach a location to the issue.
    pub fn with_location(mut self, location: Point2D) -> Self {
        self.location = Some(location);
        self
    }

    /// Mark the issue as automatically fixable.
    pub fn with_auto_fix(mut self) -> Self {
        self.auto_fixable = true;
        self
    }
}
