//! Lumen Renderer - Whitted-style CPU ray tracing
//!
//! A recursive ray tracer for scenes built from spheres, planes, triangles
//! and OBJ meshes, lit by point lights. Surfaces are diffuse, mirrors or
//! dielectrics; there is no global illumination.

mod camera;
mod hittable;
mod mesh;
mod plane;
mod renderer;
mod scene;
mod shading;
mod sphere;
mod triangle;

pub use camera::{Camera, FIELD_OF_VIEW};
pub use hittable::{RayHit, SceneEntity, EPSILON};
pub use mesh::{Mesh, MeshError, MeshResult};
pub use plane::Plane;
pub use renderer::{
    cast_ray, color_to_rgb8, render, render_pixel, ImageBuffer, Surface, MAX_DEPTH,
    MAX_PATH_SEGMENTS,
};
pub use scene::{BuildError, BuildResult, Scene};
pub use shading::{beer_lambert, fresnel, BIAS};
pub use sphere::{solve_quadratic, Sphere};
pub use triangle::{moller_trumbore, Triangle, TriangleHit};

/// Re-export scene data from lumen_core
pub use lumen_core::{Material, MaterialKind, PointLight, RenderOptions};

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{reflect, refract, Color, Ray, Vec3};
