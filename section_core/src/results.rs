//! # Analysis Result Aggregation
//!
//! One immutable snapshot per analysis call: geometric properties, load
//! breakdown, safety factors and a formatted text report. Snapshots carry
//! only their identifier and timestamp; nothing in this module persists
//! anything or writes back to the source profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SectionResult;
use crate::geometry::GeometricProperties;
use crate::loads::{analyze_loads, AnalysisParameters, LoadAnalysis};
use crate::profile::Profile;
use crate::stability::{evaluate_stability, StabilityResult, INFINITE_SAFETY_FACTOR};
use crate::validation::GeometryIssue;

/// Immutable analysis snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unique identifier of this snapshot
    pub id: Uuid,
    /// When the analysis ran
    pub created: DateTime<Utc>,
    /// Identity of the analyzed section geometry
    pub geometry_id: Uuid,
    /// Derived geometric properties
    pub properties: GeometricProperties,
    /// Per-unit-length load breakdown
    pub loads: LoadAnalysis,
    /// Safety factors and stability verdicts
    pub stability: StabilityResult,
    /// Human-readable report text
    pub report: String,
}

impl AnalysisResult {
    /// Run the full geometry → loads → stability chain on a profile.
    ///
    /// The unit weight comes from the profile's primary material zone (or
    /// the concrete default when no zone is recorded).
    ///
    /// # Errors
    ///
    /// [`crate::errors::SectionError::InvalidInput`] if the parameters fail
    /// validation.
    pub fn build(profile: &Profile, params: &AnalysisParameters) -> SectionResult<Self> {
        let properties = GeometricProperties::of(&profile.geometry);
        let loads = analyze_loads(&properties, profile.unit_weight_kn_m3(), params)?;
        let stability = evaluate_stability(&loads, &properties, params);

        let id = Uuid::new_v4();
        let created = Utc::now();
        let report = render_report(id, created, &properties, &loads, &stability, &profile.issues);

        Ok(AnalysisResult {
            id,
            created,
            geometry_id: profile.geometry.id,
            properties,
            loads,
            stability,
            report,
        })
    }
}

fn format_factor(factor: f64) -> String {
    if factor >= INFINITE_SAFETY_FACTOR {
        "unbounded".to_string()
    } else {
        format!("{factor:.3}")
    }
}

fn pass_marker(stable: bool) -> &'static str {
    if stable {
        "PASS"
    } else {
        "FAIL"
    }
}

fn render_report(
    id: Uuid,
    created: DateTime<Utc>,
    props: &GeometricProperties,
    loads: &LoadAnalysis,
    stability: &StabilityResult,
    issues: &[GeometryIssue],
) -> String {
    let mut out = String::new();

    out.push_str("CROSS-SECTION STABILITY ANALYSIS\n");
    out.push_str(&format!("Snapshot: {id}\n"));
    out.push_str(&format!("Generated: {}\n\n", created.to_rfc3339()));

    out.push_str("GEOMETRY\n");
    out.push_str(&format!("  Net area:        {:>12.3} m²\n", props.area_m2));
    out.push_str(&format!(
        "  Centroid:        ({:.3}, {:.3}) m\n",
        props.centroid.x, props.centroid.y
    ));
    out.push_str(&format!("  Width x height:  {:.3} x {:.3} m\n", props.width_m, props.height_m));
    out.push_str(&format!("  Base width:      {:>12.3} m\n", props.base_width_m));
    out.push_str(&format!("  Crest width:     {:>12.3} m\n", props.top_width_m));
    out.push_str(&format!(
        "  Ixx / Iyy / Ixy: {:.1} / {:.1} / {:.1} m⁴\n\n",
        props.ixx_m4, props.iyy_m4, props.ixy_m4
    ));

    out.push_str("LOADS (per metre of structure length)\n");
    out.push_str(&format!("  Self-weight:     {:>12.1} kN\n", loads.self_weight_kn));
    out.push_str(&format!("  Hydrostatic:     {:>12.1} kN\n", loads.net_hydrostatic_kn));
    out.push_str(&format!("  Uplift:          {:>12.1} kN\n", loads.uplift_kn));
    out.push_str(&format!("  Seismic:         {:>12.1} kN\n", loads.seismic_kn));
    out.push_str(&format!(
        "  Effective normal:{:>12.1} kN\n\n",
        loads.effective_normal_kn
    ));

    out.push_str("STABILITY\n");
    out.push_str(&format!(
        "  Sliding:     FS = {} (required {:.2}) [{}]\n",
        format_factor(stability.sliding_factor),
        stability.required_sliding_factor,
        pass_marker(stability.sliding_stable()),
    ));
    out.push_str(&format!(
        "  Overturning: FS = {} (required {:.2}) [{}]\n",
        format_factor(stability.overturning_factor),
        stability.required_overturning_factor,
        pass_marker(stability.overturning_stable()),
    ));
    out.push_str(&format!(
        "  Moments: resisting {:.1} / overturning {:.1} kN·m\n",
        stability.resisting_moment_knm, stability.overturning_moment_knm
    ));
    out.push_str(&format!(
        "  Overall: {}\n",
        pass_marker(stability.overall_stable())
    ));
    for note in &stability.warnings {
        out.push_str(&format!("  Note: {note}\n"));
    }

    if !issues.is_empty() {
        out.push_str("\nVALIDATION ISSUES\n");
        for issue in issues {
            out.push_str(&format!(
                "  [{}] {}: {}\n",
                issue.severity,
                issue.kind.label(),
                issue.description
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Contour, Point2D};
    use crate::profile::SectionGeometry;

    fn trapezoid_profile() -> Profile {
        Profile::new(SectionGeometry::new(
            Contour::new(vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(0.0, 50.0),
                Point2D::new(10.0, 50.0),
                Point2D::new(15.0, 40.0),
                Point2D::new(20.0, 20.0),
                Point2D::new(25.0, 0.0),
            ])
            .unwrap(),
        ))
    }

    fn scenario_params() -> AnalysisParameters {
        AnalysisParameters {
            upstream_water_level_m: 40.0,
            downstream_water_level_m: 5.0,
            water_unit_weight_kn_m3: 9.8,
            seismic_coefficient: 0.1,
            friction_coefficient: 0.75,
            ..AnalysisParameters::default()
        }
    }

    #[test]
    fn test_build_snapshot() {
        let profile = trapezoid_profile();
        let result = AnalysisResult::build(&profile, &scenario_params()).unwrap();
        assert_eq!(result.geometry_id, profile.geometry.id);
        assert!((result.loads.self_weight_kn - 22_200.0).abs() < 1e-6);
        assert!((result.stability.sliding_factor - 1.259_433_962_264_151).abs() < 1e-9);
    }

    #[test]
    fn test_report_contains_all_sections() {
        let profile = trapezoid_profile();
        let result = AnalysisResult::build(&profile, &scenario_params()).unwrap();
        for field in [
            "GEOMETRY",
            "LOADS",
            "STABILITY",
            "Net area",
            "Self-weight",
            "Uplift",
            "Sliding",
            "Overturning",
            "Overall",
        ] {
            assert!(
                result.report.contains(field),
                "report is missing '{field}':\n{}",
                result.report
            );
        }
        // Sliding fails its 1.5 requirement in this scenario
        assert!(result.report.contains("FAIL"));
    }

    #[test]
    fn test_report_lists_recorded_issues() {
        use crate::validation::{IssueKind, IssueSeverity};

        let mut profile = trapezoid_profile();
        let clean = AnalysisResult::build(&profile, &scenario_params()).unwrap();
        assert!(!clean.report.contains("VALIDATION ISSUES"));

        profile.add_issue(GeometryIssue::new(
            IssueKind::NarrowCrest,
            IssueSeverity::Warning,
            "Crest width 2.0 m is below the access minimum",
            "Widen the crest to at least 3 m",
        ));
        let result = AnalysisResult::build(&profile, &scenario_params()).unwrap();
        assert!(result.report.contains("VALIDATION ISSUES"));
        assert!(result.report.contains("[Warning] Narrow crest:"));
    }

    #[test]
    fn test_report_marks_unbounded_factors() {
        let profile = trapezoid_profile();
        let result = AnalysisResult::build(&profile, &AnalysisParameters::default()).unwrap();
        assert!(result.report.contains("unbounded"));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let profile = trapezoid_profile();
        let params = AnalysisParameters {
            seismic_coefficient: 0.9,
            ..AnalysisParameters::default()
        };
        assert!(AnalysisResult::build(&profile, &params).is_err());
    }

    #[test]
    fn test_snapshot_serialization() {
        let profile = trapezoid_profile();
        let result = AnalysisResult::build(&profile, &scenario_params()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        let roundtrip: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
