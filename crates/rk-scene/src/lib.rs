//! Annotated scene graph model
//!
//! This crate contains the scene-side data read by the description exporters:
//! - SceneObject: named object with transform, geometry and material slots
//! - Annotation: per-object export tags (link, geom, collision, site, joint)
//! - Scene: ordered object forest with material and image datablocks
//! - frame: Euler convention conversion and parent-relative poses

pub mod annotation;
pub mod error;
pub mod file;
pub mod frame;
pub mod material;
pub mod object;
pub mod scene;
pub mod types;

pub use annotation::*;
pub use error::*;
pub use file::*;
pub use material::*;
pub use object::*;
pub use scene::*;
pub use types::*;
