//! # Stability Evaluator
//!
//! Sliding and overturning safety factors from the load set. Degenerate
//! numeric cases are legitimate engineering outcomes, not failures: a
//! vanishing driving force means no failure tendency exists and resolves to
//! the [`INFINITE_SAFETY_FACTOR`] sentinel, never NaN or an error.
//!
//! ## Model
//!
//! - Sliding: FS = μ·N / (H + E) with N the effective normal force, H the
//!   net hydrostatic thrust and E the seismic inertia. N ≤ 0 forces the
//!   factor to zero with a warning (no resistance to slide).
//! - Overturning about the downstream toe: resisting moment W × (toe to
//!   centroid, horizontal), overturning moment H × (upstream water depth / 3,
//!   the resultant of the triangular pressure distribution) + E × centroid
//!   height above the base.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geometry::GeometricProperties;
use crate::loads::{AnalysisParameters, LoadAnalysis};

/// Sentinel standing in for an unbounded safety margin.
///
/// Returned whenever the driving demand is zero or negative; callers can
/// compare against it directly.
pub const INFINITE_SAFETY_FACTOR: f64 = 9_999.0;

/// Safety factors and moments for one analysis.
///
/// The pass/fail booleans are methods, recomputed from the current factors
/// on every call rather than cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityResult {
    /// Sliding safety factor (or the infinite sentinel)
    pub sliding_factor: f64,
    /// Overturning safety factor (or the infinite sentinel)
    pub overturning_factor: f64,
    /// Required sliding factor the result is judged against
    pub required_sliding_factor: f64,
    /// Required overturning factor the result is judged against
    pub required_overturning_factor: f64,
    /// Resisting moment about the downstream toe (kN·m/m)
    pub resisting_moment_knm: f64,
    /// Overturning moment about the downstream toe (kN·m/m)
    pub overturning_moment_knm: f64,
    /// Degenerate-case notes emitted during evaluation
    pub warnings: Vec<String>,
}

impl StabilityResult {
    pub fn sliding_stable(&self) -> bool {
        self.sliding_factor >= self.required_sliding_factor
    }

    pub fn overturning_stable(&self) -> bool {
        self.overturning_factor >= self.required_overturning_factor
    }

    pub fn overall_stable(&self) -> bool {
        self.sliding_stable() && self.overturning_stable()
    }
}

/// Evaluate sliding and overturning stability for a load set.
pub fn evaluate_stability(
    loads: &LoadAnalysis,
    props: &GeometricProperties,
    params: &AnalysisParameters,
) -> StabilityResult {
    let mut warnings = Vec::new();

    let driving = loads.net_hydrostatic_kn + loads.seismic_kn;
    let sliding_factor = if driving <= 0.0 {
        warn!("no driving force, sliding safety factor is unbounded");
        INFINITE_SAFETY_FACTOR
    } else if loads.effective_normal_kn <= 0.0 {
        let note = format!(
            "Effective normal force {:.1} kN/m is non-positive: no frictional \
             resistance to sliding",
            loads.effective_normal_kn
        );
        warn!("{note}");
        warnings.push(note);
        0.0
    } else {
        params.friction_coefficient * loads.effective_normal_kn / driving
    };

    // Rotation point: the downstream toe at the base of the section.
    let toe_arm_m = props.bounding_box.max_x - props.centroid.x;
    let centroid_height_m = props.centroid.y - props.bounding_box.min_y;
    let resisting_moment_knm = loads.self_weight_kn * toe_arm_m;
    let overturning_moment_knm = loads.net_hydrostatic_kn
        * (params.upstream_water_level_m / 3.0)
        + loads.seismic_kn * centroid_height_m;

    let overturning_factor = if overturning_moment_knm <= 0.0 {
        warn!("no overturning moment, overturning safety factor is unbounded");
        INFINITE_SAFETY_FACTOR
    } else {
        resisting_moment_knm / overturning_moment_knm
    };

    StabilityResult {
        sliding_factor,
        overturning_factor,
        required_sliding_factor: params.required_sliding_factor,
        required_overturning_factor: params.required_overturning_factor,
        resisting_moment_knm,
        overturning_moment_knm,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Contour, GeometricProperties, Point2D};
    use crate::loads::analyze_loads;
    use crate::profile::SectionGeometry;

    fn trapezoid_props() -> GeometricProperties {
        let geometry = SectionGeometry::new(
            Contour::new(vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(0.0, 50.0),
                Point2D::new(10.0, 50.0),
                Point2D::new(15.0, 40.0),
                Point2D::new(20.0, 20.0),
                Point2D::new(25.0, 0.0),
            ])
            .unwrap(),
        );
        GeometricProperties::of(&geometry)
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
    fn test_trapezoid_safety_factors() {
        // Hand-derived from the load set: W = 22 200, H = 7 717.5,
        // U = 5 512.5, E = 2 220, N = 16 687.5 (kN/m).
        //   FS_slide = 0.75 × 16 687.5 / (7 717.5 + 2 220) = 1.259434...
        //   M_resist = 22 200 × (25 − 53 750/5 550) = 340 000 kN·m/m
        //   M_overturn = 7 717.5 × 40/3 + 2 220 × 121 500/5 550 = 151 500
        //   FS_overturn = 340 000 / 151 500 = 2.244224...
        let props = trapezoid_props();
        let params = scenario_params();
        let loads = analyze_loads(&props, 24.0, &params).unwrap();
        let result = evaluate_stability(&loads, &props, &params);

        assert!((result.sliding_factor - 1.259_433_962_264_151).abs() < 1e-9);
        assert!((result.resisting_moment_knm - 340_000.0).abs() < 1e-6);
        assert!((result.overturning_moment_knm - 151_500.0).abs() < 1e-6);
        assert!((result.overturning_factor - 2.244_224_422_442_244).abs() < 1e-9);

        // Required 1.5 for both: sliding fails, overturning passes
        assert!(!result.sliding_stable());
        assert!(result.overturning_stable());
        assert!(!result.overall_stable());
    }

    #[test]
    fn test_no_driving_force_gives_sentinel() {
        let props = trapezoid_props();
        let params = AnalysisParameters::default();
        let loads = analyze_loads(&props, 24.0, &params).unwrap();
        assert_eq!(loads.net_hydrostatic_kn, 0.0);
        assert_eq!(loads.seismic_kn, 0.0);

        let result = evaluate_stability(&loads, &props, &params);
        assert_eq!(result.sliding_factor, INFINITE_SAFETY_FACTOR);
        assert!(!result.sliding_factor.is_nan());
        assert!(result.sliding_stable());
    }

    #[test]
    fn test_no_overturning_moment_gives_sentinel() {
        let props = trapezoid_props();
        let params = AnalysisParameters::default();
        let loads = analyze_loads(&props, 24.0, &params).unwrap();
        let result = evaluate_stability(&loads, &props, &params);
        assert_eq!(result.overturning_factor, INFINITE_SAFETY_FACTOR);
        assert!(result.overall_stable());
    }

    #[test]
    fn test_non_positive_normal_forces_zero_factor() {
        let props = trapezoid_props();
        let params = scenario_params();
        // Unit weight low enough that uplift exceeds self-weight
        let loads = analyze_loads(&props, 0.1, &params).unwrap();
        assert!(loads.effective_normal_kn < 0.0);

        let result = evaluate_stability(&loads, &props, &params);
        assert_eq!(result.sliding_factor, 0.0);
        assert!(!result.sliding_stable());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_result_serialization() {
        let props = trapezoid_props();
        let params = scenario_params();
        let loads = analyze_loads(&props, 24.0, &params).unwrap();
        let result = evaluate_stability(&loads, &props, &params);
        let json = serde_json::to_string(&result).unwrap();
        let roundtrip: StabilityResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
