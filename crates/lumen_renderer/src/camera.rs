//! Camera for ray generation.
//!
//! A pinhole camera looking down +Z in camera space, rotated into world space
//! about an arbitrary axis. The field of view is fixed.

use crate::{RenderOptions, Ray};
use lumen_math::{rotate_about_axis, Vec3};

/// Horizontal field of view in degrees.
pub const FIELD_OF_VIEW: f64 = 60.0;

/// Camera for generating primary rays into the scene.
#[derive(Clone, Debug)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    position: Vec3,
    axis: Vec3,
    angle: f64,

    /// Sub-pixel offsets along each axis
    offsets: Vec<f64>,

    // Cached computed values
    scale: f64,
    aspect_ratio: f64,
}

impl Camera {
    /// Create a camera for an image of the given size.
    pub fn new(options: &RenderOptions, image_width: u32, image_height: u32) -> Self {
        let multiplier = options.aa_multiplier.max(1);
        let offsets = (0..multiplier)
            .map(|i| (i as f64 + 0.5) / multiplier as f64)
            .collect();

        Self {
            image_width,
            image_height,
            position: options.camera_position,
            axis: options.camera_axis.try_normalize().unwrap_or(Vec3::Y),
            angle: options.camera_angle,
            offsets,
            scale: (FIELD_OF_VIEW.to_radians() / 2.0).tan(),
            aspect_ratio: image_width as f64 / image_height.max(1) as f64,
        }
    }

    /// Get the number of samples taken per pixel.
    pub fn samples_per_pixel(&self) -> u32 {
        (self.offsets.len() * self.offsets.len()) as u32
    }

    /// Sub-pixel offsets along each axis, in `(0, 1)`.
    pub fn sample_offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Generate the ray through pixel (x, y) at the given sub-pixel offset.
    pub fn ray(&self, x: u32, y: u32, offset_x: f64, offset_y: f64) -> Ray {
        let px = (x as f64 + offset_x) / self.image_width as f64;
        let py = (y as f64 + offset_y) / self.image_height as f64;

        // Normalized device coordinates, +Y up
        let ndc_x = px * 2.0 - 1.0;
        let ndc_y = 1.0 - py * 2.0;

        let camera_dir = Vec3::new(ndc_x * self.scale, ndc_y * self.scale / self.aspect_ratio, 1.0);
        let world_dir = rotate_about_axis(camera_dir, self.axis, self.angle);

        Ray::new(self.position, world_dir.normalize())
    }

    /// All sample rays for pixel (x, y), row by row on a regular grid.
    pub fn pixel_rays(&self, x: u32, y: u32) -> impl Iterator<Item = Ray> + '_ {
        self.offsets.iter().flat_map(move |&oy| {
            self.offsets.iter().map(move |&ox| self.ray(x, y, ox, oy))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_sample_offsets() {
        let camera = Camera::new(&RenderOptions::default(), 10, 10);
        assert_eq!(camera.sample_offsets(), &[0.5]);
        assert_eq!(camera.samples_per_pixel(), 1);

        let options = RenderOptions::default().with_aa_multiplier(2);
        let camera = Camera::new(&options, 10, 10);
        assert_eq!(camera.sample_offsets(), &[0.25, 0.75]);
        assert_eq!(camera.samples_per_pixel(), 4);
        assert_eq!(camera.pixel_rays(3, 4).count(), 4);
    }

    #[test]
    fn test_zero_multiplier_samples_pixel_center() {
        let options = RenderOptions::default().with_aa_multiplier(0);
        let camera = Camera::new(&options, 10, 10);
        assert_eq!(camera.sample_offsets(), &[0.5]);
    }

    #[test]
    fn test_center_ray_looks_down_z() {
        let camera = Camera::new(&RenderOptions::default(), 100, 100);
        let ray = camera.ray(50, 50, 0.0, 0.0);

        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction() - Vec3::Z).length() < 1e-12);
        assert!((ray.direction().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_corner_ray_matches_field_of_view() {
        let camera = Camera::new(&RenderOptions::default(), 100, 100);

        // Left edge of the image at mid height
        let ray = camera.ray(0, 50, 0.0, 0.0);
        let half_angle = ray.direction().x.atan2(ray.direction().z).abs();

        assert!((half_angle - (FIELD_OF_VIEW / 2.0).to_radians()).abs() < 1e-12);
        assert!(ray.direction().x < 0.0);
    }

    #[test]
    fn test_top_row_points_up() {
        let camera = Camera::new(&RenderOptions::default(), 100, 100);
        assert!(camera.ray(50, 0, 0.5, 0.5).direction().y > 0.0);
        assert!(camera.ray(50, 99, 0.5, 0.5).direction().y < 0.0);
    }

    #[test]
    fn test_aspect_ratio_squeezes_vertical_extent() {
        let camera = Camera::new(&RenderOptions::default(), 200, 100);

        let right = camera.ray(200, 50, 0.0, 0.0).direction();
        let top = camera.ray(100, 0, 0.0, 0.0).direction();

        let horizontal = right.x / right.z;
        let vertical = top.y / top.z;
        assert!((horizontal / vertical - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_camera_rotation_and_position() {
        let options = RenderOptions::default()
            .with_camera_position(Vec3::new(1.0, 2.0, 3.0))
            .with_camera_rotation(Vec3::Y, FRAC_PI_2);
        let camera = Camera::new(&options, 100, 100);

        let ray = camera.ray(50, 50, 0.0, 0.0);

        // Quarter turn about +Y looks down +X
        assert_eq!(ray.origin(), Vec3::new(1.0, 2.0, 3.0));
        assert!((ray.direction() - Vec3::X).length() < 1e-12);
    }
}
