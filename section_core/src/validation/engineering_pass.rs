//! # Engineering Validation Pass
//!
//! Engineering-standard plausibility checks: foundation presence and
//! attachment, drainage provision, material zoning, and the proportion
//! rules for a gravity section.

use crate::profile::Profile;
use crate::validation::{GeometryIssue, IssueKind, IssueSeverity};

/// How close a foundation endpoint must sit to the main contour (m).
const FOUNDATION_ATTACH_TOLERANCE_M: f64 = 0.5;
/// Height to base-width limit for a gravity section.
const MAX_SLENDERNESS_RATIO: f64 = 2.0;
/// Minimum crest width for access (m).
const MIN_CREST_WIDTH_M: f64 = 3.0;

pub(crate) fn run(profile: &Profile) -> Vec<GeometryIssue> {
    let mut issues = Vec::new();

    check_foundation(profile, &mut issues);
    check_drainage(profile, &mut issues);
    check_material_zones(profile, &mut issues);
    check_proportions(profile, &mut issues);

    issues
}

fn check_foundation(profile: &Profile, issues: &mut Vec<GeometryIssue>) {
    let main = &profile.geometry.main_contour;
    match &profile.geometry.foundation {
        None => {
            issues.push(GeometryIssue::new(
                IssueKind::MissingFoundation,
                IssueSeverity::Error,
                "No foundation contour is recorded for the section",
                "Extract or draw the foundation interface contour",
            ));
        }
        Some(foundation) => {
            for endpoint in [foundation.first(), foundation.last()] {
                let gap = main.distance_to_point(&endpoint);
                if gap > FOUNDATION_ATTACH_TOLERANCE_M {
                    issues.push(
                        GeometryIssue::new(
                            IssueKind::DetachedFoundation,
                            IssueSeverity::Warning,
                            format!(
                                "Foundation endpoint is {gap:.2} m from the main contour \
                                 (tolerance {FOUNDATION_ATTACH_TOLERANCE_M} m)"
                            ),
                            "Snap the foundation endpoints onto the section boundary",
                        )
                        .with_location(endpoint),
                    );
                }
            }
        }
    }
}

fn check_drainage(profile: &Profile, issues: &mut Vec<GeometryIssue>) {
    if !profile.features.has_drainage() {
        issues.push(GeometryIssue::new(
            IssueKind::MissingDrainage,
            IssueSeverity::Warning,
            "No drainage system feature is recorded",
            "Record the drainage gallery or curtain location",
        ));
    }
}

fn check_material_zones(profile: &Profile, issues: &mut Vec<GeometryIssue>) {
    let zones = &profile.geometry.material_zones;
    if zones.is_empty() {
        issues.push(
            GeometryIssue::new(
                IssueKind::NoMaterialZones,
                IssueSeverity::Warning,
                "The section has no material zones",
                "Assign a default concrete zone covering the section",
            )
            .with_auto_fix(),
        );
        return;
    }

    // Zones may legitimately share boundaries; a bounding-box overlap is
    // flagged per pair for review, not rejected.
    for i in 0..zones.len() {
        for j in (i + 1)..zones.len() {
            let a = zones[i].boundary.bounding_box();
            let b = zones[j].boundary.bounding_box();
            if a.overlaps(&b) {
                issues.push(GeometryIssue::new(
                    IssueKind::OverlappingZones,
                    IssueSeverity::Warning,
                    format!(
                        "Material zones '{}' and '{}' overlap",
                        zones[i].name, zones[j].name
                    ),
                    "Review the zone boundaries and remove unintended overlap",
                ));
            }
        }
    }
}

fn check_proportions(profile: &Profile, issues: &mut Vec<GeometryIssue>) {
    let main = &profile.geometry.main_contour;
    let height = main.bounding_box().height();
    let base = main.base_width();
    let crest = main.top_width();

    let slenderness = if base > 1e-9 {
        height / base
    } else {
        f64::INFINITY
    };
    if slenderness > MAX_SLENDERNESS_RATIO {
        issues.push(GeometryIssue::new(
            IssueKind::ExcessiveSlenderness,
            IssueSeverity::Warning,
            format!(
                "Height to base-width ratio {slenderness:.2} exceeds {MAX_SLENDERNESS_RATIO} \
                 for a gravity section"
            ),
            "Widen the base or verify the section type",
        ));
    }

    if crest < MIN_CREST_WIDTH_M {
        issues.push(GeometryIssue::new(
            IssueKind::NarrowCrest,
            IssueSeverity::Warning,
            format!("Crest width {crest:.2} m is below the {MIN_CREST_WIDTH_M} m access minimum"),
            "Widen the crest to at least the access minimum",
        ));
    }
}
