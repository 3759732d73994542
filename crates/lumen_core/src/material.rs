//! Surface materials.

use lumen_math::Color;
use serde::{Deserialize, Serialize};

/// How a surface responds to incoming light.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Lambertian surface lit directly by point lights
    Diffuse,
    /// Ideal mirror
    Reflective,
    /// Ideal dielectric (glass, water)
    Refractive,
}

/// A surface material.
///
/// `color` is the albedo for diffuse surfaces. For refractive surfaces it is
/// the per-channel extinction coefficient used for absorption inside the
/// medium, so black means perfectly clear.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub kind: MaterialKind,

    pub color: Color,

    /// Index of refraction (only meaningful for `Refractive`)
    #[serde(default = "default_refractive_index")]
    pub refractive_index: f64,
}

fn default_refractive_index() -> f64 {
    1.0
}

impl Material {
    pub fn new(kind: MaterialKind, color: Color, refractive_index: f64) -> Self {
        Self {
            kind,
            color,
            refractive_index,
        }
    }

    /// Create a diffuse material with the given albedo.
    pub fn diffuse(color: Color) -> Self {
        Self::new(MaterialKind::Diffuse, color, 1.0)
    }

    /// Create a mirror material.
    pub fn reflective(color: Color) -> Self {
        Self::new(MaterialKind::Reflective, color, 1.0)
    }

    /// Create a dielectric material.
    ///
    /// - `absorption`: extinction coefficient per unit distance travelled inside
    /// - `ior`: index of refraction (1.0 = vacuum, 1.5 = glass, 2.4 = diamond)
    pub fn refractive(absorption: Color, ior: f64) -> Self {
        Self::new(MaterialKind::Refractive, absorption, ior)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::splat(0.5)) // Grey default
    }
}
