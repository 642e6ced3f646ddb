//! Target description formats
//!
//! A [`TargetFormat`] renders the shared kinematic tree and asset registry
//! into one XML document. MJCF and URDF are provided.

mod mjcf;
mod urdf;

pub use mjcf::MjcfFormat;
pub use urdf::UrdfFormat;

use rk_scene::{Scene, SceneObject};

use crate::assets::AssetRegistry;
use crate::error::ExportError;
use crate::export::ExportOptions;
use crate::joint::ActuatorSpec;
use crate::tree::KinematicBody;
use crate::xml::XmlElement;

/// Everything a format needs to build one root's document
pub struct DocumentContext<'a> {
    pub scene: &'a Scene,
    pub options: &'a ExportOptions,
    pub root: &'a SceneObject,
    pub model_name: &'a str,
    pub assets: &'a AssetRegistry,
    pub tree: &'a KinematicBody,
    /// Materials referenced in this tree, first-use order
    pub materials: &'a [String],
    /// Actuators whose joint exists in this tree
    pub actuators: &'a [&'a ActuatorSpec],
}

pub trait TargetFormat {
    fn name(&self) -> &'static str;

    /// Output file extension, without the dot
    fn extension(&self) -> &'static str;

    /// Whether documents start with an XML declaration
    fn xml_declaration(&self) -> bool {
        false
    }

    fn build_document(&self, ctx: &DocumentContext<'_>) -> Result<XmlElement, ExportError>;
}
