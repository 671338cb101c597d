//! # Geometry Validation Pass
//!
//! Geometric consistency checks on the main contour: closure, dimensional
//! plausibility, face slopes, segment-length sanity and self-intersection.
//! Pure over the profile; findings are returned, not appended.

use crate::geometry::{Contour, Point2D, Vector2D, CLOSURE_TOLERANCE_M};
use crate::profile::Profile;
use crate::validation::{GeometryIssue, IssueKind, IssueSeverity};

/// Plausible structure height range (m).
const HEIGHT_RANGE_M: (f64, f64) = (5.0, 300.0);
/// Plausible width/height aspect-ratio range.
const ASPECT_RATIO_RANGE: (f64, f64) = (0.5, 15.0);
/// Plausible upstream face slope range (Δheight/Δwidth).
const UPSTREAM_SLOPE_RANGE: (f64, f64) = (0.05, 1.0);
/// Plausible downstream face slope range (Δheight/Δwidth).
const DOWNSTREAM_SLOPE_RANGE: (f64, f64) = (0.7, 1.5);
/// Segment-length sanity bounds (m).
const MAX_SEGMENT_LENGTH_M: f64 = 50.0;
const MIN_SEGMENT_LENGTH_M: f64 = 0.01;

pub(crate) fn run(profile: &Profile) -> Vec<GeometryIssue> {
    let contour = &profile.geometry.main_contour;
    let mut issues = Vec::new();

    check_closure(contour, &mut issues);
    check_dimensions(contour, &mut issues);
    check_slopes(contour, &mut issues);
    check_segment_lengths(contour, &mut issues);
    check_self_intersection(contour, &mut issues);

    issues
}

fn check_closure(contour: &Contour, issues: &mut Vec<GeometryIssue>) {
    let gap = contour.first().distance_to(&contour.last());
    if gap >= CLOSURE_TOLERANCE_M {
        issues.push(
            GeometryIssue::new(
                IssueKind::OpenContour,
                IssueSeverity::Error,
                format!("Contour endpoints are {gap:.3} m apart"),
                "Close the contour so that the first and last points coincide",
            )
            .with_location(contour.last()),
        );
    }
}

fn check_dimensions(contour: &Contour, issues: &mut Vec<GeometryIssue>) {
    let bbox = contour.bounding_box();
    let height = bbox.height();
    let width = bbox.width();

    if !(HEIGHT_RANGE_M.0..=HEIGHT_RANGE_M.1).contains(&height) {
        issues.push(GeometryIssue::new(
            IssueKind::ImplausibleHeight,
            IssueSeverity::Warning,
            format!(
                "Section height {height:.1} m is outside the plausible range [{}, {}] m",
                HEIGHT_RANGE_M.0, HEIGHT_RANGE_M.1
            ),
            "Verify the section scale and the cutting-plane placement",
        ));
    }

    if height > 0.0 {
        let aspect = width / height;
        if !(ASPECT_RATIO_RANGE.0..=ASPECT_RATIO_RANGE.1).contains(&aspect) {
            issues.push(GeometryIssue::new(
                IssueKind::ImplausibleAspectRatio,
                IssueSeverity::Warning,
                format!(
                    "Width/height ratio {aspect:.2} is outside the plausible range [{}, {}]",
                    ASPECT_RATIO_RANGE.0, ASPECT_RATIO_RANGE.1
                ),
                "Verify the section proportions",
            ));
        }
    }
}

/// Face slopes estimated from the point subsets either side of the mean-x
/// line: Δheight/Δwidth of each subset's extent. Subsets too narrow to give
/// a meaningful ratio are skipped.
fn check_slopes(contour: &Contour, issues: &mut Vec<GeometryIssue>) {
    let mean_x =
        contour.points().iter().map(|p| p.x).sum::<f64>() / contour.len() as f64;

    let upstream: Vec<&Point2D> = contour.points().iter().filter(|p| p.x < mean_x).collect();
    let downstream: Vec<&Point2D> = contour.points().iter().filter(|p| p.x >= mean_x).collect();

    if let Some(slope) = subset_slope(&upstream) {
        if !(UPSTREAM_SLOPE_RANGE.0..=UPSTREAM_SLOPE_RANGE.1).contains(&slope) {
            issues.push(GeometryIssue::new(
                IssueKind::ImplausibleUpstreamSlope,
                IssueSeverity::Warning,
                format!(
                    "Upstream face slope {slope:.2} is outside the plausible range [{}, {}]",
                    UPSTREAM_SLOPE_RANGE.0, UPSTREAM_SLOPE_RANGE.1
                ),
                "Review the upstream face geometry",
            ));
        }
    }
    if let Some(slope) = subset_slope(&downstream) {
        if !(DOWNSTREAM_SLOPE_RANGE.0..=DOWNSTREAM_SLOPE_RANGE.1).contains(&slope) {
            issues.push(GeometryIssue::new(
                IssueKind::ImplausibleDownstreamSlope,
                IssueSeverity::Warning,
                format!(
                    "Downstream face slope {slope:.2} is outside the plausible range [{}, {}]",
                    DOWNSTREAM_SLOPE_RANGE.0, DOWNSTREAM_SLOPE_RANGE.1
                ),
                "Review the downstream face geometry",
            ));
        }
    }
}

fn subset_slope(points: &[&Point2D]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let dw = max_x - min_x;
    if dw < 1e-6 {
        // Vertical face, no meaningful height/width ratio
        return None;
    }
    Some((max_y - min_y) / dw)
}

/// Segment-length sanity over consecutive point pairs. Both findings are
/// non-blocking.
fn check_segment_lengths(contour: &Contour, issues: &mut Vec<GeometryIssue>) {
    let points = contour.points();
    for window in points.windows(2) {
        let (a, b) = (window[0], window[1]);
        let length = a.distance_to(&b);
        if length > MAX_SEGMENT_LENGTH_M {
            issues.push(
                GeometryIssue::new(
                    IssueKind::OversizedSegment,
                    IssueSeverity::Warning,
                    format!("Segment of {length:.1} m exceeds {MAX_SEGMENT_LENGTH_M} m"),
                    "Verify the segment is intended, or refine the contour",
                )
                .with_location(a),
            );
        } else if length < MIN_SEGMENT_LENGTH_M {
            issues.push(
                GeometryIssue::new(
                    IssueKind::UndersizedSegment,
                    IssueSeverity::Info,
                    format!("Segment of {length:.4} m is below {MIN_SEGMENT_LENGTH_M} m"),
                    "Consider merging near-coincident points",
                )
                .with_location(a),
            );
        }
    }
}

/// Self-intersection over all non-adjacent edge pairs, skipping
/// index-adjacent edges and the wrap-around pair.
fn check_self_intersection(contour: &Contour, issues: &mut Vec<GeometryIssue>) {
    let edges: Vec<(Point2D, Point2D)> = contour.edges().collect();
    let n = edges.len();
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            if let Some(at) = segment_intersection(edges[i], edges[j]) {
                issues.push(
                    GeometryIssue::new(
                        IssueKind::SelfIntersection,
                        IssueSeverity::Error,
                        format!(
                            "Edges {i} and {j} cross at ({:.3}, {:.3})",
                            at.x, at.y
                        ),
                        "Remove the crossing by reordering or correcting the points",
                    )
                    .with_location(at),
                );
            }
        }
    }
}

/// Interior intersection point of two segments, if any.
///
/// Standard parametrization: both parameters strictly inside (0, 1), so
/// shared endpoints of touching edges do not count as crossings.
fn segment_intersection(a: (Point2D, Point2D), b: (Point2D, Point2D)) -> Option<Point2D> {
    let d1 = Vector2D::between(&a.0, &a.1);
    let d2 = Vector2D::between(&b.0, &b.1);
    let denom = d1.cross(&d2);
    if denom.abs() < 1e-12 {
        return None;
    }
    let offset = Vector2D::between(&a.0, &b.0);
    let t = offset.cross(&d2) / denom;
    let u = offset.cross(&d1) / denom;
    let eps = 1e-9;
    if t > eps && t < 1.0 - eps && u > eps && u < 1.0 - eps {
        Some(Point2D::new(a.0.x + t * d1.dx, a.0.y + t * d1.dy))
    } else {
        None
    }
}
