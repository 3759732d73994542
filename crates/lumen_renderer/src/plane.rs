//! Infinite plane primitive.

use crate::{
    hittable::{RayHit, SceneEntity, EPSILON},
    Material, Ray,
};
use lumen_math::Vec3;

/// An infinite plane through `center` facing `normal`.
#[derive(Clone, Debug)]
pub struct Plane {
    center: Vec3,
    /// Unit normal
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Create a new plane. The normal is normalized here; a zero normal
    /// yields a plane that is never hit.
    pub fn new(center: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            center,
            normal: normal.normalize_or_zero(),
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl SceneEntity for Plane {
    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let d = -self.center.dot(self.normal);
        let t = -(ray.origin().dot(self.normal) + d) / ray.direction().dot(self.normal);

        // Parallel rays divide by zero and give NaN or infinity
        if !t.is_finite() || t <= EPSILON {
            return None;
        }

        Some(RayHit::new(ray, t, self.normal, self.material))
    }

    fn material(&self) -> Material {
        self.material
    }
}
