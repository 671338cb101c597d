//! # Load Analyzer
//!
//! Per-unit-length load superposition for a gravity section: self-weight,
//! net hydrostatic thrust, uplift and seismic inertia, all in kN per metre
//! of structure length. Parameters are validated wholesale before any
//! number is computed.
//!
//! The uplift model is a deliberate simplification: a uniform pressure at
//! the average of the two heads over the base width, scaled by the
//! reduction factor. Do not replace it with an integrated distribution
//! without revisiting the calibration of the safety thresholds.
//!
//! ## Example
//!
//! ```rust
//! use section_core::geometry::{Contour, Point2D, GeometricProperties};
//! use section_core::profile::SectionGeometry;
//! use section_core::loads::{analyze_loads, AnalysisParameters};
//!
//! let geometry = SectionGeometry::new(Contour::new(vec![
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(20.0, 0.0),
//!     Point2D::new(20.0, 30.0),
//!     Point2D::new(0.0, 30.0),
//! ]).unwrap());
//! let props = GeometricProperties::of(&geometry);
//!
//! let params = AnalysisParameters {
//!     upstream_water_level_m: 25.0,
//!     downstream_water_level_m: 2.0,
//!     ..AnalysisParameters::default()
//! };
//! let loads = analyze_loads(&props, 24.0, &params).unwrap();
//! assert!(loads.net_hydrostatic_kn > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SectionError, SectionResult};
use crate::geometry::GeometricProperties;

/// Externally supplied analysis parameters.
///
/// Must pass [`AnalysisParameters::validate`] before use in any
/// calculation; the load and stability functions call it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParameters {
    /// Upstream (reservoir) water level above the base (m)
    pub upstream_water_level_m: f64,
    /// Downstream (tailwater) level above the base (m)
    pub downstream_water_level_m: f64,
    /// Unit weight of water (kN/m³)
    pub water_unit_weight_kn_m3: f64,
    /// Pseudo-static seismic coefficient (fraction of gravity)
    pub seismic_coefficient: f64,
    /// Concrete-rock friction coefficient
    pub friction_coefficient: f64,
    /// Required sliding safety factor
    pub required_sliding_factor: f64,
    /// Required overturning safety factor
    pub required_overturning_factor: f64,
    /// Whether uplift is included in the load set
    pub consider_uplift: bool,
    /// Uplift reduction factor for drainage effectiveness, 0..1
    pub uplift_reduction_factor: f64,
}

impl Default for AnalysisParameters {
    fn default() -> Self {
        AnalysisParameters {
            upstream_water_level_m: 0.0,
            downstream_water_level_m: 0.0,
            water_unit_weight_kn_m3: 9.81,
            seismic_coefficient: 0.0,
            friction_coefficient: 0.75,
            required_sliding_factor: 1.5,
            required_overturning_factor: 1.5,
            consider_uplift: true,
            uplift_reduction_factor: 1.0,
        }
    }
}

impl AnalysisParameters {
    /// Validate all parameters before use.
    ///
    /// # Errors
    ///
    /// [`SectionError::InvalidInput`] for the first out-of-range or
    /// non-finite field found.
    pub fn validate(&self) -> SectionResult<()> {
        let finite_fields = [
            ("upstream_water_level_m", self.upstream_water_level_m),
            ("downstream_water_level_m", self.downstream_water_level_m),
            ("water_unit_weight_kn_m3", self.water_unit_weight_kn_m3),
            ("seismic_coefficient", self.seismic_coefficient),
            ("friction_coefficient", self.friction_coefficient),
            ("required_sliding_factor", self.required_sliding_factor),
            (
                "required_overturning_factor",
                self.required_overturning_factor,
            ),
            ("uplift_reduction_factor", self.uplift_reduction_factor),
        ];
        for (field, value) in finite_fields {
            if !value.is_finite() {
                return Err(SectionError::invalid_input(
                    field,
                    value.to_string(),
                    "Value must be finite",
                ));
            }
        }

        if self.upstream_water_level_m < 0.0 {
            return Err(SectionError::invalid_input(
                "upstream_water_level_m",
                self.upstream_water_level_m.to_string(),
                "Water level must not be negative",
            ));
        }
        if self.downstream_water_level_m < 0.0 {
            return Err(SectionError::invalid_input(
                "downstream_water_level_m",
                self.downstream_water_level_m.to_string(),
                "Water level must not be negative",
            ));
        }
        if self.water_unit_weight_kn_m3 <= 0.0 {
            return Err(SectionError::invalid_input(
                "water_unit_weight_kn_m3",
                self.water_unit_weight_kn_m3.to_string(),
                "Water unit weight must be positive",
            ));
        }
        if !(0.0..=0.4).contains(&self.seismic_coefficient) {
            return Err(SectionError::invalid_input(
                "seismic_coefficient",
                self.seismic_coefficient.to_string(),
                "Seismic coefficient must be within [0, 0.4]",
            ));
        }
        if !(0.0..=1.5).contains(&self.friction_coefficient) {
            return Err(SectionError::invalid_input(
                "friction_coefficient",
                self.friction_coefficient.to_string(),
                "Friction coefficient must be within [0, 1.5]",
            ));
        }
        if self.required_sliding_factor <= 0.0 {
            return Err(SectionError::invalid_input(
                "required_sliding_factor",
                self.required_sliding_factor.to_string(),
                "Required safety factor must be positive",
            ));
        }
        if self.required_overturning_factor <= 0.0 {
            return Err(SectionError::invalid_input(
                "required_overturning_factor",
                self.required_overturning_factor.to_string(),
                "Required safety factor must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.uplift_reduction_factor) {
            return Err(SectionError::invalid_input(
                "uplift_reduction_factor",
                self.uplift_reduction_factor.to_string(),
                "Uplift reduction factor must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Per-unit-length load breakdown (kN per metre of structure length).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadAnalysis {
    /// Self-weight W = area × unit weight
    pub self_weight_kn: f64,

    /// Net horizontal hydrostatic thrust, floored at zero
    ///
    /// A higher downstream level never produces a negative driving force.
    pub net_hydrostatic_kn: f64,

    /// Uplift beneath the base (0 when uplift is not considered)
    pub uplift_kn: f64,

    /// Pseudo-static seismic inertia E = k × W
    pub seismic_kn: f64,

    /// Effective normal force N = W − U
    ///
    /// May be negative; the stability evaluator handles that case
    /// explicitly rather than this module hiding it.
    pub effective_normal_kn: f64,
}

/// Compute the load set for a section.
///
/// `unit_weight_kn_m3` is the structure's material unit weight (typically
/// from the profile's primary material zone).
///
/// # Errors
///
/// [`SectionError::InvalidInput`] if the parameters fail validation or the
/// unit weight is not a positive finite number.
pub fn analyze_loads(
    props: &GeometricProperties,
    unit_weight_kn_m3: f64,
    params: &AnalysisParameters,
) -> SectionResult<LoadAnalysis> {
    params.validate()?;
    if !unit_weight_kn_m3.is_finite() || unit_weight_kn_m3 <= 0.0 {
        return Err(SectionError::invalid_input(
            "unit_weight_kn_m3",
            unit_weight_kn_m3.to_string(),
            "Unit weight must be a positive finite number",
        ));
    }

    let gamma_w = params.water_unit_weight_kn_m3;
    let h_up = params.upstream_water_level_m;
    let h_down = params.downstream_water_level_m;

    let self_weight_kn = props.area_m2 * unit_weight_kn_m3;

    let net_hydrostatic_kn =
        (0.5 * gamma_w * h_up * h_up - 0.5 * gamma_w * h_down * h_down).max(0.0);

    let uplift_kn = if params.consider_uplift {
        let average_head = 0.5 * (h_up + h_down);
        params.uplift_reduction_factor * average_head * props.base_width_m * gamma_w
    } else {
        0.0
    };

    let seismic_kn = params.seismic_coefficient * self_weight_kn;

    Ok(LoadAnalysis {
        self_weight_kn,
        net_hydrostatic_kn,
        uplift_kn,
        seismic_kn,
        effective_normal_kn: self_weight_kn - uplift_kn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Contour, Point2D};
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
    fn test_trapezoid_load_set() {
        // Hand-derived: area 925 m², W = 925 × 24 = 22 200 kN/m,
        // H = 0.5 × 9.8 × (40² − 5²) = 7 717.5 kN/m,
        // U = 1.0 × 22.5 × 25 × 9.8 = 5 512.5 kN/m, E = 0.1 × W.
        let loads = analyze_loads(&trapezoid_props(), 24.0, &scenario_params()).unwrap();
        assert!((loads.self_weight_kn - 22_200.0).abs() < 1e-6);
        assert!((loads.net_hydrostatic_kn - 7_717.5).abs() < 1e-6);
        assert!((loads.uplift_kn - 5_512.5).abs() < 1e-6);
        assert!((loads.seismic_kn - 2_220.0).abs() < 1e-6);
        assert!((loads.effective_normal_kn - 16_687.5).abs() < 1e-6);
    }

    #[test]
    fn test_hydrostatic_floored_at_zero() {
        let params = AnalysisParameters {
            upstream_water_level_m: 5.0,
            downstream_water_level_m: 10.0,
            ..AnalysisParameters::default()
        };
        let loads = analyze_loads(&trapezoid_props(), 24.0, &params).unwrap();
        assert_eq!(loads.net_hydrostatic_kn, 0.0);
    }

    #[test]
    fn test_uplift_disabled() {
        let params = AnalysisParameters {
            consider_uplift: false,
            ..scenario_params()
        };
        let loads = analyze_loads(&trapezoid_props(), 24.0, &params).unwrap();
        assert_eq!(loads.uplift_kn, 0.0);
        assert_eq!(loads.effective_normal_kn, loads.self_weight_kn);
    }

    #[test]
    fn test_negative_effective_normal_preserved() {
        // Tiny unit weight with full uplift: W < U must survive as a
        // negative effective normal force.
        let loads = analyze_loads(&trapezoid_props(), 0.1, &scenario_params()).unwrap();
        assert!(loads.effective_normal_kn < 0.0);
    }

    #[test]
    fn test_parameter_validation() {
        let mut params = scenario_params();
        params.seismic_coefficient = 0.9;
        assert!(analyze_loads(&trapezoid_props(), 24.0, &params).is_err());

        let mut params = scenario_params();
        params.friction_coefficient = 2.0;
        assert!(params.validate().is_err());

        let mut params = scenario_params();
        params.upstream_water_level_m = -1.0;
        assert!(params.validate().is_err());

        let mut params = scenario_params();
        params.water_unit_weight_kn_m3 = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_parameters_serialization() {
        let params = scenario_params();
        let json = serde_json::to_string(&params).unwrap();
        let roundtrip: AnalysisParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, roundtrip);
    }
}
