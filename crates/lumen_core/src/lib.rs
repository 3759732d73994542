//! Lumen Core - Scene data and file formats for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Scene data types**: `Material`, `PointLight`, `RenderOptions`
//! - **OBJ support**: line-based Wavefront OBJ parsing into `ObjData`
//! - **Scene descriptions**: JSON scene files describing entities, lights
//!   and camera options
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_description;
//!
//! let description = load_description("scenes/glass.json")?;
//! println!("{} entities, {} lights",
//!     description.entities.len(),
//!     description.lights.len());
//! ```

pub mod description;
pub mod material;
pub mod obj;
pub mod scene;

// Re-export commonly used types
pub use description::{load_description, DescriptionError, EntityDescription, SceneDescription};
pub use material::{Material, MaterialKind};
pub use obj::{load_obj, parse_obj, ObjData, ObjError};
pub use scene::{PointLight, RenderOptions};
