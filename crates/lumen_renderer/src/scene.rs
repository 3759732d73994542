//! Scene container: entities, lights and render options.

use std::path::PathBuf;
use std::sync::Arc;

use lumen_core::{DescriptionError, EntityDescription, PointLight, RenderOptions, SceneDescription};
use thiserror::Error;

use crate::{
    hittable::{RayHit, SceneEntity},
    mesh::{Mesh, MeshError},
    plane::Plane,
    renderer::{self, Surface},
    sphere::Sphere,
    triangle::Triangle,
    Color, Ray,
};

/// Errors that can occur while building a scene from a description.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Scene description error: {0}")]
    Description(#[from] DescriptionError),

    #[error("Failed to load mesh {path}: {source}")]
    Mesh {
        path: PathBuf,
        #[source]
        source: MeshError,
    },
}

/// Result type for scene construction.
pub type BuildResult<T> = Result<T, BuildError>;

/// A renderable scene.
///
/// Entities and lights are kept in insertion order without duplicates. The
/// render options are fixed at construction.
pub struct Scene {
    options: RenderOptions,
    entities: Vec<Arc<dyn SceneEntity>>,
    lights: Vec<PointLight>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            entities: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Build a scene from a parsed description, loading any OBJ meshes it
    /// references. Entities sharing a material name get equal materials.
    pub fn from_description(description: &SceneDescription) -> BuildResult<Self> {
        let mut scene = Self::new(description.options);

        for entity in &description.entities {
            let material = description.material(entity.material_name())?;
            let entity: Arc<dyn SceneEntity> = match entity {
                EntityDescription::Sphere { center, radius, .. } => {
                    Arc::new(Sphere::new(*center, *radius, material))
                }
                EntityDescription::Plane { center, normal, .. } => {
                    Arc::new(Plane::new(*center, *normal, material))
                }
                EntityDescription::Triangle { v0, v1, v2, .. } => {
                    Arc::new(Triangle::new(*v0, *v1, *v2, material))
                }
                EntityDescription::Obj {
                    path,
                    offset,
                    scale,
                    ..
                } => {
                    let mesh = Mesh::load(path, *offset, *scale, material).map_err(|source| {
                        BuildError::Mesh {
                            path: path.clone(),
                            source,
                        }
                    })?;
                    Arc::new(mesh)
                }
            };
            scene.add_entity(entity);
        }

        for light in &description.lights {
            scene.add_point_light(*light);
        }

        log::debug!(
            "Built scene: {} entities, {} lights",
            scene.entity_count(),
            scene.light_count()
        );

        Ok(scene)
    }

    /// Add an entity. Adding the same `Arc` twice is a no-op.
    pub fn add_entity(&mut self, entity: Arc<dyn SceneEntity>) {
        if self.entities.iter().any(|e| Arc::ptr_eq(e, &entity)) {
            return;
        }
        self.entities.push(entity);
    }

    /// Add a point light. Adding an equal light twice is a no-op.
    pub fn add_point_light(&mut self, light: PointLight) {
        if self.lights.contains(&light) {
            return;
        }
        self.lights.push(light);
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn entities(&self) -> &[Arc<dyn SceneEntity>] {
        &self.entities
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Intersect every entity and keep the hit closest to the ray origin.
    ///
    /// Returns the index of the struck entity with the hit. Ties go to the
    /// entity added first.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<(usize, RayHit)> {
        let mut nearest: Option<(f64, usize, RayHit)> = None;

        for (index, entity) in self.entities.iter().enumerate() {
            let Some(hit) = entity.intersect(ray) else {
                continue;
            };

            let distance = ray.distance_to(hit.position);
            if nearest.map_or(true, |(best, _, _)| distance < best) {
                nearest = Some((distance, index, hit));
            }
        }

        nearest.map(|(_, index, hit)| (index, hit))
    }

    /// Colour seen along `ray`. See [`renderer::cast_ray`].
    pub fn cast_ray(&self, ray: &Ray, depth: i32) -> Color {
        renderer::cast_ray(self, ray, depth)
    }

    /// Render every pixel of `surface`.
    pub fn render(&self, surface: &mut dyn Surface) {
        renderer::render(self, surface);
    }
}
