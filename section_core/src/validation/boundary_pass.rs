//! # Boundary-Condition Validation Pass
//!
//! Completeness checks on the boundary-condition entries of a profile:
//! water levels, foundation constraint, load provision and per-zone material
//! sanity. Besides issues, this pass reports which well-known conditions are
//! missing; the missing list drives its own score penalty.

use crate::profile::Profile;
use crate::validation::{BoundaryConditionKind, GeometryIssue, IssueKind, IssueSeverity};

pub(crate) fn run(profile: &Profile) -> (Vec<GeometryIssue>, Vec<BoundaryConditionKind>) {
    let mut issues = Vec::new();
    let mut missing = Vec::new();
    let bc = &profile.boundary_conditions;

    let upstream_set = matches!(bc.upstream_water_level_m, Some(v) if v > 0.0);
    if !upstream_set {
        issues.push(
            GeometryIssue::new(
                IssueKind::MissingUpstreamLevel,
                IssueSeverity::Warning,
                "Upstream water level is missing or non-positive",
                "Set the upstream reservoir level above the base",
            )
            .with_auto_fix(),
        );
        missing.push(BoundaryConditionKind::UpstreamWaterLevel);
    }

    if let Some(downstream) = bc.downstream_water_level_m {
        if downstream < 0.0 {
            issues.push(GeometryIssue::new(
                IssueKind::NegativeDownstreamLevel,
                IssueSeverity::Info,
                format!("Downstream water level {downstream:.2} m is below the base"),
                "Confirm the tailwater datum, or set the level to zero",
            ));
        }
    }

    // A reservoir below tailwater is a contradictory hydraulic state, not a
    // plausible load case.
    if let (Some(upstream), Some(downstream)) =
        (bc.upstream_water_level_m, bc.downstream_water_level_m)
    {
        if upstream > 0.0 && upstream <= downstream {
            issues.push(GeometryIssue::new(
                IssueKind::ContradictoryWaterLevels,
                IssueSeverity::Error,
                format!(
                    "Upstream level {upstream:.2} m does not exceed downstream level \
                     {downstream:.2} m"
                ),
                "Swap or correct the water levels",
            ));
        }
    }

    if bc.foundation_constraint.is_none() {
        issues.push(GeometryIssue::new(
            IssueKind::MissingFoundationConstraint,
            IssueSeverity::Warning,
            "No foundation constraint entry is recorded",
            "Record the foundation fixity (e.g., fixed base on rock)",
        ));
        missing.push(BoundaryConditionKind::FoundationConstraint);
    }

    // Without either a gravity-load entry or a positive upstream level the
    // section has no load at all; recorded as missing, not as an issue.
    if !bc.gravity_load && !upstream_set {
        missing.push(BoundaryConditionKind::GravityLoad);
    }

    for zone in &profile.geometry.material_zones {
        let props = &zone.properties;
        if props.density_kn_m3 <= 0.0 || props.elastic_modulus_mpa <= 0.0 {
            issues.push(
                GeometryIssue::new(
                    IssueKind::InvalidZoneMaterial,
                    IssueSeverity::Warning,
                    format!(
                        "Material zone '{}' has non-positive density or elastic modulus",
                        zone.name
                    ),
                    "Assign positive material properties to the zone",
                )
                .with_auto_fix(),
            );
        }
    }

    (issues, missing)
}
