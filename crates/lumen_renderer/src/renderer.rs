//! Whitted-style recursive ray tracer.
//!
//! Implements:
//! - Direct diffuse lighting from point lights with hard shadows
//! - Perfect mirror reflection
//! - Dielectric refraction with Fresnel blending and Beer-Lambert absorption
//! - Anti-aliasing via a regular sub-pixel grid

use lumen_math::{reflect, refract};

use crate::{
    camera::Camera,
    hittable::RayHit,
    scene::Scene,
    shading::{beer_lambert, biased_origins, fresnel},
    Color, MaterialKind, Ray,
};

/// Recursion depth past which a hit returns its material's flat colour.
pub const MAX_DEPTH: i32 = 5;

/// Hard cap on ray segments along one path from the camera.
///
/// Transmitted rays recurse with a *lower* depth, so depth alone does not
/// bound refraction chains.
pub const MAX_PATH_SEGMENTS: u32 = 32;

/// Minimum distance inside a medium before absorption is applied.
const MIN_ABSORPTION_DISTANCE: f64 = 1e-6;

/// Something pixels can be written to.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// Compute the colour seen along `ray`.
///
/// `depth` starts at 0 for camera rays. Rays that hit nothing are black.
pub fn cast_ray(scene: &Scene, ray: &Ray, depth: i32) -> Color {
    trace(scene, ray, depth, 1)
}

fn trace(scene: &Scene, ray: &Ray, depth: i32, segments: u32) -> Color {
    if segments > MAX_PATH_SEGMENTS {
        return Color::ZERO;
    }

    let Some((index, hit)) = scene.nearest_hit(ray) else {
        return Color::ZERO;
    };

    if depth > MAX_DEPTH {
        return hit.material.color;
    }

    match hit.material.kind {
        MaterialKind::Diffuse => shade_diffuse(scene, index, &hit),
        MaterialKind::Reflective => shade_reflective(scene, &hit, depth, segments),
        MaterialKind::Refractive => shade_refractive(scene, index, &hit, depth, segments),
    }
}

/// Lambertian shading with one shadow ray per light.
///
/// The struck entity never shadows itself.
fn shade_diffuse(scene: &Scene, index: usize, hit: &RayHit) -> Color {
    let mut color = Color::ZERO;

    for light in scene.lights() {
        let to_light = light.position - hit.position;
        let Some(direction) = to_light.try_normalize() else {
            continue;
        };
        let light_distance = to_light.length();

        let shadow_ray = Ray::new(hit.position, direction);
        let occluded = scene
            .entities()
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .filter_map(|(_, entity)| entity.intersect(&shadow_ray))
            .any(|blocker| shadow_ray.distance_to(blocker.position) < light_distance);
        if occluded {
            continue;
        }

        let lambert = hit.normal.dot(direction).max(0.0);
        color += lambert * hit.material.color * light.color;
    }

    color
}

fn shade_reflective(scene: &Scene, hit: &RayHit, depth: i32, segments: u32) -> Color {
    let (origin, _) = biased_origins(hit.position, hit.normal, hit.incident);
    let direction = reflect(hit.incident, hit.normal).normalize();

    trace(scene, &Ray::new(origin, direction), depth + 1, segments + 1)
}

fn shade_refractive(
    scene: &Scene,
    index: usize,
    hit: &RayHit,
    depth: i32,
    segments: u32,
) -> Color {
    let ior = hit.material.refractive_index;
    let kr = fresnel(hit.incident, hit.normal, ior);
    let (reflect_origin, refract_origin) = biased_origins(hit.position, hit.normal, hit.incident);

    let mut transmitted = Color::ZERO;
    if kr < 1.0 {
        let refracted = refract(hit.incident, hit.normal, ior).and_then(|t| t.try_normalize());
        if let Some(direction) = refracted {
            let ray = Ray::new(refract_origin, direction);
            transmitted = trace(scene, &ray, depth - 1, segments + 1);

            // Distance travelled through the medium
            if let Some(exit) = scene.entities()[index].intersect(&ray) {
                let distance = ray.distance_to(exit.position);
                if distance > MIN_ABSORPTION_DISTANCE {
                    transmitted *= beer_lambert(hit.material.color, distance);
                }
            }
        }
    }

    let direction = reflect(hit.incident, hit.normal).normalize();
    let reflected = trace(scene, &Ray::new(reflect_origin, direction), depth + 1, segments + 1);

    reflected * kr + transmitted * (1.0 - kr)
}

/// Render a single pixel, averaging every sample on the camera's grid.
pub fn render_pixel(scene: &Scene, camera: &Camera, x: u32, y: u32) -> Color {
    let mut pixel_color = Color::ZERO;

    for ray in camera.pixel_rays(x, y) {
        pixel_color += scene.cast_ray(&ray, 0);
    }

    // Box filter
    pixel_color / camera.samples_per_pixel() as f64
}

/// Render the entire scene into `surface`.
///
/// Single-threaded, row by row from the top.
pub fn render(scene: &Scene, surface: &mut dyn Surface) {
    let (width, height) = (surface.width(), surface.height());
    let camera = Camera::new(scene.options(), width, height);

    log::info!(
        "Rendering {}x{} @ {} spp ({} entities, {} lights)",
        width,
        height,
        camera.samples_per_pixel(),
        scene.entity_count(),
        scene.light_count()
    );
    let start = std::time::Instant::now();

    let rows_per_report = (height / 10).max(1);
    for y in 0..height {
        for x in 0..width {
            let color = render_pixel(scene, &camera, x, y);
            surface.set_pixel(x, y, color);
        }

        if (y + 1) % rows_per_report == 0 {
            log::debug!("Rendered {}/{} rows", y + 1, height);
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[pixel_index(self.width, x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[pixel_index(self.width, x, y)] = color;
    }

    /// Convert to 8-bit RGB bytes, row-major.
    ///
    /// Channels are clamped to [0, 1] and scaled; no gamma is applied.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

// Row-major, in usize so large images do not wrap in u32
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

impl Surface for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }
}

/// Convert a colour to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let c = color.clamp(Color::ZERO, Color::ONE) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
}
