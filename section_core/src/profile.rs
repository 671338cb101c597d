//! # Profile
//!
//! The profile is the unit of analysis: an immutable [`SectionGeometry`]
//! extracted by the upstream projector, composed with the mutable annotation
//! and validation state that accumulates around it (feature points, boundary
//! conditions, the append-only issue list and the validation status).
//!
//! ## Structure
//!
//! ```text
//! Profile
//! ├── geometry: SectionGeometry (id, contours, zones - never mutated)
//! ├── features: FeaturePoints (crest/heel/toe + extension map)
//! ├── boundary_conditions: BoundaryConditions
//! ├── issues: Vec<GeometryIssue> (append-only, cleared en masse)
//! └── status: ValidationStatus
//! ```
//!
//! Only two things mutate a profile: feature identification
//! ([`Profile::identify_features`]) and the validation engine appending
//! issues and updating the status. The contours themselves are never touched
//! after extraction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Contour, Point2D};
use crate::materials::MaterialZone;
use crate::validation::{GeometryIssue, IssueSeverity, ValidationStatus};

/// Default unit weight when no material zone is recorded (kN/m³).
pub const DEFAULT_UNIT_WEIGHT_KN_M3: f64 = 24.0;

/// Immutable geometric value of an extracted cross-section.
///
/// Produced once by the external 3D-to-2D projector and identified by a
/// UUID; the mutable validation state in [`Profile`] is keyed off this
/// identity rather than extending the geometry itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Stable identity of this extracted section
    pub id: Uuid,

    /// Outer boundary of the cross-section
    pub main_contour: Contour,

    /// Inner hole contours (galleries, conduits)
    pub holes: Vec<Contour>,

    /// Foundation interface contour, if extracted
    pub foundation: Option<Contour>,

    /// Material zones of the section
    pub material_zones: Vec<MaterialZone>,
}

impl SectionGeometry {
    /// Create a geometry with just a main contour; holes, foundation and
    /// zones can be filled in by the caller before analysis.
    pub fn new(main_contour: Contour) -> Self {
        SectionGeometry {
            id: Uuid::new_v4(),
            main_contour,
            holes: Vec::new(),
            foundation: None,
            material_zones: Vec::new(),
        }
    }
}

/// Well-known feature points of a section, plus a generic extension map for
/// open-ended annotations.
///
/// Explicit fields replace string-keyed lookup for the entries every check
/// knows about; only genuinely open-ended markers go through `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeaturePoints {
    /// Crest point (midpoint of the top point cluster)
    pub crest: Option<Point2D>,
    /// Upstream base corner
    pub heel: Option<Point2D>,
    /// Downstream base corner
    pub toe: Option<Point2D>,
    /// Drainage gallery location
    pub drainage_gallery: Option<Point2D>,
    /// Open-ended named annotations
    #[serde(default)]
    pub extra: HashMap<String, Point2D>,
}

impl FeaturePoints {
    /// Whether any drainage feature is recorded, either the well-known field
    /// or a named annotation mentioning drainage.
    pub fn has_drainage(&self) -> bool {
        self.drainage_gallery.is_some()
            || self.extra.keys().any(|k| k.to_lowercase().contains("drain"))
    }
}

/// Boundary-condition entries attached to a profile.
///
/// Water levels follow the convention of the checks that consume them: a
/// missing or non-positive upstream level counts as "not set".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundaryConditions {
    /// Upstream (reservoir) water level above the base (m)
    pub upstream_water_level_m: Option<f64>,
    /// Downstream (tailwater) level above the base (m)
    pub downstream_water_level_m: Option<f64>,
    /// Foundation fixity description, if recorded
    pub foundation_constraint: Option<String>,
    /// Whether a gravity (self-weight) load entry is recorded
    pub gravity_load: bool,
    /// Open-ended named entries
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

/// Cross-section profile: immutable geometry plus mutable validation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// The extracted geometry (never mutated after creation)
    pub geometry: SectionGeometry,

    /// Named feature points
    pub features: FeaturePoints,

    /// Boundary-condition entries
    pub boundary_conditions: BoundaryConditions,

    /// Append-only issue list, populated by the validation engine
    pub issues: Vec<GeometryIssue>,

    /// Current validation status
    pub status: ValidationStatus,
}

impl Profile {
    /// Wrap an extracted geometry in a fresh profile with empty annotations
    /// and `Pending` status.
    pub fn new(geometry: SectionGeometry) -> Self {
        Profile {
            geometry,
            features: FeaturePoints::default(),
            boundary_conditions: BoundaryConditions::default(),
            issues: Vec::new(),
            status: ValidationStatus::Pending,
        }
    }

    /// Identify the crest, heel and toe from the main contour extremes.
    ///
    /// Heel and toe are the leftmost and rightmost points of the base point
    /// cluster; the crest is the midpoint of the top cluster. Existing
    /// entries are overwritten, the extension map is untouched.
    pub fn identify_features(&mut self) {
        let contour = &self.geometry.main_contour;
        let bbox = contour.bounding_box();
        let tol = 1e-6;

        let mut heel: Option<Point2D> = None;
        let mut toe: Option<Point2D> = None;
        let (mut crest_min, mut crest_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in contour.points() {
            if (p.y - bbox.min_y).abs() < tol {
                if heel.map_or(true, |h| p.x < h.x) {
                    heel = Some(*p);
                }
                if toe.map_or(true, |t| p.x > t.x) {
                    toe = Some(*p);
                }
            }
            if (p.y - bbox.max_y).abs() < tol {
                crest_min = crest_min.min(p.x);
                crest_max = crest_max.max(p.x);
            }
        }
        self.features.heel = heel;
        self.features.toe = toe;
        if crest_max >= crest_min {
            self.features.crest = Some(Point2D::new((crest_min + crest_max) / 2.0, bbox.max_y));
        }
    }

    /// Append an issue to the profile.
    pub fn add_issue(&mut self, issue: GeometryIssue) {
        self.issues.push(issue);
    }

    /// Clear all issues en masse (issues are never edited individually).
    pub fn clear_issues(&mut self) {
        self.issues.clear();
    }

    /// Highest severity among the recorded issues.
    pub fn max_severity(&self) -> Option<IssueSeverity> {
        self.issues.iter().map(|i| i.severity).max()
    }

    /// Whether any recorded issue is Critical.
    pub fn has_critical_issues(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity >= IssueSeverity::Critical)
    }

    /// Whether any recorded issue warrants user review (Warning or above).
    pub fn requires_user_review(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity >= IssueSeverity::Warning)
    }

    /// Unit weight used for self-weight: the first material zone's density,
    /// or conventional concrete when no zone is recorded.
    pub fn unit_weight_kn_m3(&self) -> f64 {
        self.geometry
            .material_zones
            .first()
            .map(|z| z.properties.density_kn_m3)
            .unwrap_or(DEFAULT_UNIT_WEIGHT_KN_M3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::IssueKind;

    fn dam_profile() -> Profile {
        let contour = Contour::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 50.0),
            Point2D::new(10.0, 50.0),
            Point2D::new(15.0, 40.0),
            Point2D::new(20.0, 20.0),
            Point2D::new(25.0, 0.0),
        ])
        .unwrap();
        Profile::new(SectionGeometry::new(contour))
    }

    #[test]
    fn test_identify_features() {
        let mut profile = dam_profile();
        profile.identify_features();
        assert_eq!(profile.features.heel, Some(Point2D::new(0.0, 0.0)));
        assert_eq!(profile.features.toe, Some(Point2D::new(25.0, 0.0)));
        assert_eq!(profile.features.crest, Some(Point2D::new(5.0, 50.0)));
    }

    #[test]
    fn test_issue_bookkeeping() {
        let mut profile = dam_profile();
        assert_eq!(profile.max_severity(), None);
        assert!(!profile.requires_user_review());

        profile.add_issue(GeometryIssue::new(
            IssueKind::NarrowCrest,
            IssueSeverity::Warning,
            "Crest narrower than 3 m",
            "Widen the crest",
        ));
        assert!(profile.requires_user_review());
        assert!(!profile.has_critical_issues());

        profile.add_issue(GeometryIssue::new(
            IssueKind::ValidationPassFailure,
            IssueSeverity::Critical,
            "Pass failed",
            "Report the failure",
        ));
        assert!(profile.has_critical_issues());
        assert_eq!(profile.max_severity(), Some(IssueSeverity::Critical));

        profile.clear_issues();
        assert!(profile.issues.is_empty());
    }

    #[test]
    fn test_default_unit_weight() {
        let profile = dam_profile();
        assert_eq!(profile.unit_weight_kn_m3(), DEFAULT_UNIT_WEIGHT_KN_M3);
    }

    #[test]
    fn test_drainage_via_extension_map() {
        let mut profile = dam_profile();
        assert!(!profile.features.has_drainage());
        profile
            .features
            .extra
            .insert("Drainage curtain".to_string(), Point2D::new(5.0, 2.0));
        assert!(profile.features.has_drainage());
    }

    #[test]
    fn test_serialization() {
        let profile = dam_profile();
        let json = serde_json::to_string_pretty(&profile).unwrap();
        let roundtrip: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, roundtrip);
    }
}
