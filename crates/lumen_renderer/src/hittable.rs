//! SceneEntity trait and RayHit for ray-object intersection.

use crate::{Material, Ray};
use lumen_math::Vec3;

/// Every primitive rejects hits with `t <= EPSILON`.
///
/// Keeps secondary rays from re-hitting the surface they start on.
pub const EPSILON: f64 = 1e-5;

/// Record of a ray-object intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal at the intersection (outward, not flipped towards the ray)
    pub normal: Vec3,
    /// Normalized direction of the ray that produced the hit
    pub incident: Vec3,
    /// Material of the struck surface
    pub material: Material,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Barycentric coordinates for triangle hits, zero otherwise
    pub u: f64,
    pub v: f64,
}

impl RayHit {
    /// Build a hit at parameter `t` along `ray`.
    ///
    /// `ray.direction()` must be non-zero.
    pub fn new(ray: &Ray, t: f64, normal: Vec3, material: Material) -> Self {
        Self {
            position: ray.at(t),
            normal,
            incident: ray.direction().normalize(),
            material,
            t,
            u: 0.0,
            v: 0.0,
        }
    }

    /// Attach barycentric coordinates.
    pub fn with_barycentric(mut self, u: f64, v: f64) -> Self {
        self.u = u;
        self.v = v;
        self
    }
}

/// Trait for objects that can be placed in a scene and hit by rays.
pub trait SceneEntity: Send + Sync {
    /// Test if a ray hits this entity.
    ///
    /// Returns the nearest hit in front of the ray origin, or `None`.
    /// Degenerate configurations are misses, never errors.
    fn intersect(&self, ray: &Ray) -> Option<RayHit>;

    /// The material applied to this entity.
    fn material(&self) -> Material;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hit_new() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 4.0));
        let hit = RayHit::new(&ray, 0.5, Vec3::Y, Material::default());

        assert_eq!(hit.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(hit.incident, Vec3::Z);
        assert_eq!((hit.u, hit.v), (0.0, 0.0));

        let hit = hit.with_barycentric(0.25, 0.5);
        assert_eq!((hit.u, hit.v), (0.25, 0.5));
    }
}
