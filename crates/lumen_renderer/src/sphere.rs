//! Sphere primitive for ray tracing.

use crate::{
    hittable::{RayHit, SceneEntity, EPSILON},
    Material, Ray,
};
use lumen_math::Vec3;

/// A sphere primitive.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Solve `a·t² + b·t + c = 0`, returning the roots in ascending order.
///
/// Uses `q = -½(b ± √Δ)` with the sign of `b` so that neither root is
/// computed by subtracting nearly equal values.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let (t0, t1) = if discriminant == 0.0 {
        let t = -0.5 * b / a;
        (t, t)
    } else {
        let sqrtd = discriminant.sqrt();
        let q = if b > 0.0 {
            -0.5 * (b + sqrtd)
        } else {
            -0.5 * (b - sqrtd)
        };
        (q / a, c / q)
    };

    Some(if t0 > t1 { (t1, t0) } else { (t0, t1) })
}

impl SceneEntity for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let l = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        if a == 0.0 {
            return None;
        }
        let b = 2.0 * ray.direction().dot(l);
        let c = l.length_squared() - self.radius * self.radius;

        let (t0, t1) = solve_quadratic(a, b, c)?;

        // Nearest root in front of the origin
        let t = if t0 > EPSILON { t0 } else { t1 };
        if !(t > EPSILON) {
            return None;
        }

        let position = ray.at(t);
        let normal = (position - self.center).try_normalize()?;
        Some(RayHit::new(ray, t, normal, self.material))
    }

    fn material(&self) -> Material {
        self.material
    }
}
