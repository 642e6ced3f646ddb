//! Kinematic tree export for annotated scenes
//!
//! Every un-parented link in a [`rk_scene::Scene`] becomes one MJCF (or
//! URDF) document:
//! - classify: what each annotated object becomes
//! - tree: depth-first walk producing body-relative poses
//! - assets: textures, materials, meshes and actuators
//! - target: format-specific rendering of the tree
//! - export: options, per-root documents and the mesh side channel
//! - import: reading bodies and geoms back into a scene

pub mod assets;
pub mod attributes;
pub mod classify;
pub mod error;
pub mod export;
pub mod format;
pub mod import;
pub mod joint;
pub mod mesh;
pub mod target;
pub mod tree;
pub mod xml;

pub use assets::AssetRegistry;
pub use attributes::AttributeSet;
pub use classify::{ElementKind, GeomSpec, classify};
pub use error::ExportError;
pub use export::{
    ConfigError, Document, ExportFormat, ExportOptions, ExportSummary, RootFailure, build_document,
    export_roots, export_scene, export_scene_with, export_to_string,
};
pub use import::{ImportError, ImportReport, ImportedModel, apply_to_scene, read_model};
pub use joint::{AngleConversion, JointSpec};
pub use mesh::{MeshExporter, ObjMeshExporter};
pub use target::{MjcfFormat, TargetFormat, UrdfFormat};
pub use tree::{KinematicBody, TreeWalker};
pub use xml::XmlElement;
