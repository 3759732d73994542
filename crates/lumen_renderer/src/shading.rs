//! Optics helpers used by the shading model.

use lumen_math::{Color, Vec3};

/// Offset applied to secondary ray origins along the surface normal.
pub const BIAS: f64 = 1e-4;

/// Fraction of light reflected at a dielectric boundary (full Fresnel
/// equations, unpolarized).
///
/// `incident` and `normal` are unit vectors; the normal may face either way.
/// Returns 1 on total internal reflection.
pub fn fresnel(incident: Vec3, normal: Vec3, ior: f64) -> f64 {
    let cosi = incident.dot(normal).clamp(-1.0, 1.0);
    let (etai, etat) = if cosi > 0.0 { (ior, 1.0) } else { (1.0, ior) };

    // Snell's law
    let sint = etai / etat * (1.0 - cosi * cosi).max(0.0).sqrt();
    if sint >= 1.0 {
        return 1.0;
    }

    let cost = (1.0 - sint * sint).max(0.0).sqrt();
    let cosi = cosi.abs();
    let rs = (etat * cosi - etai * cost) / (etat * cosi + etai * cost);
    let rp = (etai * cosi - etat * cost) / (etai * cosi + etat * cost);
    (rs * rs + rp * rp) / 2.0
}

/// Per-channel transmittance after travelling `distance` through a medium
/// with extinction coefficient `absorbance` (Beer-Lambert).
pub fn beer_lambert(absorbance: Color, distance: f64) -> Color {
    let exponent = absorbance * -distance;
    Color::new(exponent.x.exp(), exponent.y.exp(), exponent.z.exp())
}

/// Origins for secondary rays leaving a surface point.
///
/// Returns `(incident_side, far_side)`: the point nudged back towards where
/// the incident ray came from, and the point nudged through the surface.
pub fn biased_origins(position: Vec3, normal: Vec3, incident: Vec3) -> (Vec3, Vec3) {
    let bias = BIAS * normal;
    let outside = incident.dot(normal) < 0.0;
    if outside {
        (position + bias, position - bias)
    } else {
        (position - bias, position + bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresnel_normal_incidence() {
        let n: f64 = 1.5;
        let kr = fresnel(-Vec3::Y, Vec3::Y, n);
        let expected = ((n - 1.0) / (n + 1.0)).powi(2);

        assert!((kr - expected).abs() < 1e-12, "kr = {kr}, expected {expected}");
    }

    #[test]
    fn test_fresnel_normal_incidence_from_inside() {
        // Same reflectance leaving the medium head-on
        let kr = fresnel(Vec3::Y, Vec3::Y, 1.5);
        assert!((kr - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_fresnel_grazing_incidence_reflects_more() {
        let head_on = fresnel(-Vec3::Y, Vec3::Y, 1.5);
        let grazing = fresnel(Vec3::new(1.0, -0.05, 0.0).normalize(), Vec3::Y, 1.5);

        assert!(grazing > head_on);
        assert!(grazing < 1.0);
    }

    #[test]
    fn test_fresnel_total_internal_reflection() {
        // Leaving glass at ~84 degrees from the normal
        let incident = Vec3::new(1.0, 0.1, 0.0).normalize();
        assert_eq!(fresnel(incident, Vec3::Y, 1.5), 1.0);
    }

    #[test]
    fn test_fresnel_matched_index_transmits_everything() {
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        assert!(fresnel(incident, Vec3::Y, 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_beer_lambert() {
        let t = beer_lambert(Color::new(0.0, 1.0, 2.0), 0.5);

        assert_eq!(t.x, 1.0);
        assert!((t.y - (-0.5f64).exp()).abs() < 1e-12);
        assert!((t.z - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_biased_origins() {
        let p = Vec3::ZERO;

        // Arriving from above a +Y surface
        let (near, far) = biased_origins(p, Vec3::Y, -Vec3::Y);
        assert!(near.y > 0.0 && far.y < 0.0);

        // Arriving from below
        let (near, far) = biased_origins(p, Vec3::Y, Vec3::Y);
        assert!(near.y < 0.0 && far.y > 0.0);
        assert!((far - p).length() - BIAS < 1e-15);
    }
}
