//! Lights and render options shared by scene descriptions and the renderer.

use lumen_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

/// An infinitely small light emitting equally in all directions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,

    /// Color and intensity of the emitted light
    pub color: Color,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// Camera and sampling options, fixed for the duration of a render.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Origin of every camera ray
    pub camera_position: Vec3,

    /// Unit axis the camera is rotated about
    pub camera_axis: Vec3,

    /// Rotation about `camera_axis` in radians
    pub camera_angle: f64,

    /// Samples per pixel along each axis (total samples = n * n)
    pub aa_multiplier: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            camera_position: Vec3::ZERO,
            camera_axis: Vec3::Y,
            camera_angle: 0.0,
            aa_multiplier: 1,
        }
    }
}

impl RenderOptions {
    /// Set camera position.
    pub fn with_camera_position(mut self, position: Vec3) -> Self {
        self.camera_position = position;
        self
    }

    /// Set camera orientation as a rotation of `angle` radians about `axis`.
    pub fn with_camera_rotation(mut self, axis: Vec3, angle: f64) -> Self {
        self.camera_axis = axis;
        self.camera_angle = angle;
        self
    }

    /// Set the anti-aliasing multiplier.
    pub fn with_aa_multiplier(mut self, multiplier: u32) -> Self {
        self.aa_multiplier = multiplier;
        self
    }
}
