//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{
    hittable::{RayHit, SceneEntity, EPSILON},
    Material, Ray,
};
use lumen_math::{Interval, Vec3};

/// Parameters of a ray-triangle intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter
    pub t: f64,
    /// Barycentric weight of the second vertex
    pub u: f64,
    /// Barycentric weight of the third vertex
    pub v: f64,
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Rejects rays nearly parallel to the triangle (and degenerate triangles),
/// hits outside the triangle, and hits with `t <= EPSILON`.
pub fn moller_trumbore(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);
    if !Interval::UNIT.contains(u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t > EPSILON {
        Some(TriangleHit { t, u, v })
    } else {
        None
    }
}

/// A triangle primitive.
#[derive(Clone, Debug)]
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Unit face normal, `(v1 - v0) × (v2 - v0)`; zero for degenerate triangles
    normal: Vec3,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self {
            v0,
            v1,
            v2,
            normal,
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }
}

impl SceneEntity for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let TriangleHit { t, u, v } = moller_trumbore(ray, self.v0, self.v1, self.v2)?;
        Some(RayHit::new(ray, t, self.normal, self.material).with_barycentric(u, v))
    }

    fn material(&self) -> Material {
        self.material
    }
}
