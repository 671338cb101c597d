//! # Materials
//!
//! Material properties and the material zones of a cross-section. A zone is
//! a named region of the section with its own properties; zones may
//! geometrically overlap, which the validation engine reports as an issue
//! rather than this module rejecting it.
//!
//! ## Example
//!
//! ```rust
//! use section_core::materials::{MaterialProperties, MaterialZone};
//! use section_core::geometry::{Contour, Point2D};
//!
//! let body = MaterialZone {
//!     name: "Dam body".to_string(),
//!     boundary: Contour::new(vec![
//!         Point2D::new(0.0, 0.0),
//!         Point2D::new(25.0, 0.0),
//!         Point2D::new(10.0, 50.0),
//!     ]).unwrap(),
//!     properties: MaterialProperties::concrete(),
//! };
//! assert_eq!(body.properties.density_kn_m3, 24.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::Contour;

/// Mechanical properties of a zone material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Unit weight (kN/m³)
    pub density_kn_m3: f64,
    /// Elastic modulus (MPa)
    pub elastic_modulus_mpa: f64,
    /// Poisson ratio
    pub poisson_ratio: f64,
    /// Compressive strength (MPa)
    pub compressive_strength_mpa: f64,
    /// Tensile strength (MPa)
    pub tensile_strength_mpa: f64,
    /// Concrete-rock friction coefficient
    pub friction_coefficient: f64,
}

impl MaterialProperties {
    /// Conventional mass concrete.
    pub fn concrete() -> Self {
        MaterialProperties {
            density_kn_m3: 24.0,
            elastic_modulus_mpa: 30_000.0,
            poisson_ratio: 0.2,
            compressive_strength_mpa: 30.0,
            tensile_strength_mpa: 3.0,
            friction_coefficient: 0.75,
        }
    }
}

impl Default for MaterialProperties {
    fn default() -> Self {
        MaterialProperties::concrete()
    }
}

/// Named material region of the cross-section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialZone {
    /// User label (e.g., "Dam body", "RCC core")
    pub name: String,
    /// Zone boundary polygon
    pub boundary: Contour,
    /// Material properties of the zone
    pub properties: MaterialProperties,
}
