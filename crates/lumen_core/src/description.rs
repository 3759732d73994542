//! JSON scene descriptions.
//!
//! A description lists named materials, the entities that use them, point
//! lights and the render options:
//!
//! ```json
//! {
//!   "options": { "camera_position": [0, 0, 0], "aa_multiplier": 2 },
//!   "materials": {
//!     "red": { "kind": "diffuse", "color": [1, 0, 0] },
//!     "glass": { "kind": "refractive", "color": [0, 0, 0], "refractive_index": 1.5 }
//!   },
//!   "entities": [
//!     { "type": "sphere", "center": [0, 0, 5], "radius": 1, "material": "red" },
//!     { "type": "obj", "path": "models/bunny.obj", "offset": [0, 0, 3], "scale": 1, "material": "glass" }
//!   ],
//!   "lights": [ { "position": [0, 5, 5], "color": [1, 1, 1] } ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::Material;
use crate::scene::{PointLight, RenderOptions};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material `{0}`")]
    UnknownMaterial(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

/// Result type for description operations.
pub type DescriptionResult<T> = Result<T, DescriptionError>;

/// One renderable entity of a description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityDescription {
    Sphere {
        center: Vec3,
        radius: f64,
        material: String,
    },
    Plane {
        center: Vec3,
        normal: Vec3,
        material: String,
    },
    Triangle {
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        material: String,
    },
    /// Triangle mesh read from an OBJ file
    Obj {
        path: PathBuf,
        #[serde(default)]
        offset: Vec3,
        #[serde(default = "unit_scale")]
        scale: f64,
        material: String,
    },
}

fn unit_scale() -> f64 {
    1.0
}

impl EntityDescription {
    /// Name of the material this entity refers to.
    pub fn material_name(&self) -> &str {
        match self {
            Self::Sphere { material, .. }
            | Self::Plane { material, .. }
            | Self::Triangle { material, .. }
            | Self::Obj { material, .. } => material,
        }
    }
}

/// A complete scene description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub options: RenderOptions,

    #[serde(default)]
    pub materials: BTreeMap<String, Material>,

    #[serde(default)]
    pub entities: Vec<EntityDescription>,

    #[serde(default)]
    pub lights: Vec<PointLight>,
}

impl SceneDescription {
    /// Parse and validate a description from JSON text.
    ///
    /// Relative OBJ paths are left untouched.
    pub fn from_json(json: &str) -> DescriptionResult<Self> {
        let description: SceneDescription = serde_json::from_str(json)?;
        description.validate()?;
        Ok(description)
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> DescriptionResult<Material> {
        self.materials
            .get(name)
            .copied()
            .ok_or_else(|| DescriptionError::UnknownMaterial(name.to_string()))
    }

    /// Check material references and option ranges.
    pub fn validate(&self) -> DescriptionResult<()> {
        if self.options.aa_multiplier == 0 {
            return Err(DescriptionError::InvalidOption(
                "aa_multiplier must be at least 1".to_string(),
            ));
        }

        let axis_length = self.options.camera_axis.length();
        if (axis_length - 1.0).abs() > 1e-6 {
            return Err(DescriptionError::InvalidOption(format!(
                "camera_axis must be a unit vector (length is {axis_length})"
            )));
        }

        for entity in &self.entities {
            self.material(entity.material_name())?;
        }

        Ok(())
    }

    /// Make relative OBJ paths relative to `base` instead of the working directory.
    pub fn resolve_paths(&mut self, base: &Path) {
        for entity in &mut self.entities {
            if let EntityDescription::Obj { path, .. } = entity {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }
}

/// Load a scene description from a JSON file.
///
/// OBJ paths inside the description are resolved against the directory
/// containing the file.
pub fn load_description<P: AsRef<Path>>(path: P) -> DescriptionResult<SceneDescription> {
    let path = path.as_ref();
    log::debug!("Loading scene description: {}", path.display());

    let content = std::fs::read_to_string(path)?;
    let mut description = SceneDescription::from_json(&content)?;

    if let Some(base) = path.parent() {
        description.resolve_paths(base);
    }

    log::info!(
        "Loaded {}: {} materials, {} entities, {} lights",
        path.display(),
        description.materials.len(),
        description.entities.len(),
        description.lights.len()
    );

    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialKind;
    use std::io::Write;

    const SCENE: &str = r#"{
        "options": { "camera_position": [0, 1, -2], "aa_multiplier": 2 },
        "materials": {
            "red": { "kind": "diffuse", "color": [1, 0, 0] },
            "glass": { "kind": "refractive", "color": [0, 0, 0], "refractive_index": 1.5 }
        },
        "entities": [
            { "type": "sphere", "center": [0, 0, 5], "radius": 1, "material": "red" },
            { "type": "plane", "center": [0, -1, 0], "normal": [0, 1, 0], "material": "red" },
            { "type": "triangle", "v0": [0, 0, 1], "v1": [1, 0, 1], "v2": [0, 1, 1], "material": "glass" },
            { "type": "obj", "path": "models/tri.obj", "material": "glass" }
        ],
        "lights": [ { "position": [0, 5, 5], "color": [1, 1, 1] } ]
    }"#;

    #[test]
    fn test_parse_description() {
        let description = SceneDescription::from_json(SCENE).unwrap();

        assert_eq!(description.options.aa_multiplier, 2);
        assert_eq!(description.options.camera_position, Vec3::new(0.0, 1.0, -2.0));
        assert_eq!(description.entities.len(), 4);
        assert_eq!(description.lights[0].position, Vec3::new(0.0, 5.0, 5.0));
        assert_eq!(
            description.material("glass").unwrap().kind,
            MaterialKind::Refractive
        );
    }

    #[test]
    fn test_obj_defaults() {
        let description = SceneDescription::from_json(SCENE).unwrap();

        match &description.entities[3] {
            EntityDescription::Obj { offset, scale, .. } => {
                assert_eq!(*offset, Vec3::ZERO);
                assert_eq!(*scale, 1.0);
            }
            other => panic!("expected obj entity, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{
            "entities": [ { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "gold" } ]
        }"#;

        let err = SceneDescription::from_json(json).unwrap_err();
        assert!(matches!(err, DescriptionError::UnknownMaterial(name) if name == "gold"));
    }

    #[test]
    fn test_invalid_options() {
        let zero_aa = r#"{ "options": { "aa_multiplier": 0 } }"#;
        assert!(matches!(
            SceneDescription::from_json(zero_aa).unwrap_err(),
            DescriptionError::InvalidOption(_)
        ));

        let bad_axis = r#"{ "options": { "camera_axis": [0, 2, 0] } }"#;
        assert!(matches!(
            SceneDescription::from_json(bad_axis).unwrap_err(),
            DescriptionError::InvalidOption(_)
        ));
    }

    #[test]
    fn test_unknown_entity_type() {
        let json = r#"{ "entities": [ { "type": "torus", "material": "red" } ] }"#;
        assert!(matches!(
            SceneDescription::from_json(json).unwrap_err(),
            DescriptionError::Json(_)
        ));
    }

    #[test]
    fn test_empty_description() {
        let description = SceneDescription::from_json("{}").unwrap();
        assert_eq!(description, SceneDescription::default());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(SCENE.as_bytes())
            .unwrap();

        let description = load_description(&path).unwrap();

        match &description.entities[3] {
            EntityDescription::Obj { path, .. } => {
                assert_eq!(*path, dir.path().join("models/tri.obj"));
            }
            other => panic!("expected obj entity, got {other:?}"),
        }
    }
}
