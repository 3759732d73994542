// Re-export glam for convenience
pub use glam;

/// Double precision vector used for all geometry.
pub type Vec3 = glam::DVec3;

/// RGB color with unclamped real-valued channels.
pub type Color = glam::DVec3;

// Lumen math types
mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{reflect, refract, rotate_about_axis};
