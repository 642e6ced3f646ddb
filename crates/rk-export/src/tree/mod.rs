//! Format-neutral kinematic tree
//!
//! The walker turns one export root into a [`KinematicBody`] tree with all
//! poses already expressed relative to the enclosing body. Target formats
//! only render this tree.

mod walker;

pub use walker::{TreeWalker, WalkOutput};

use glam::DVec3;
use rk_scene::{Pose, Primitive};
use uuid::Uuid;

use crate::joint::JointSpec;

/// A body and everything attached to it
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    pub name: String,
    pub object: Uuid,
    /// Pose relative to the enclosing body (local pose for the root)
    pub pose: Pose,
    pub joint: Option<JointSpec>,
    /// Geoms and sites, in emission order
    pub elements: Vec<BodyElement>,
    pub bodies: Vec<KinematicBody>,
}

impl KinematicBody {
    pub fn new(name: impl Into<String>, object: Uuid, pose: Pose, joint: Option<JointSpec>) -> Self {
        Self {
            name: name.into(),
            object,
            pose,
            joint,
            elements: Vec::new(),
            bodies: Vec::new(),
        }
    }

    pub fn geoms(&self) -> impl Iterator<Item = &GeomElement> {
        self.elements.iter().filter_map(|e| match e {
            BodyElement::Geom(geom) => Some(geom),
            BodyElement::Site(_) => None,
        })
    }

    pub fn sites(&self) -> impl Iterator<Item = &SiteElement> {
        self.elements.iter().filter_map(|e| match e {
            BodyElement::Site(site) => Some(site),
            BodyElement::Geom(_) => None,
        })
    }

    /// This body and all nested bodies, depth first
    pub fn descendants(&self) -> Vec<&KinematicBody> {
        let mut out = vec![self];
        for body in &self.bodies {
            out.extend(body.descendants());
        }
        out
    }

    pub fn find(&self, name: &str) -> Option<&KinematicBody> {
        self.descendants().into_iter().find(|b| b.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyElement {
    Geom(GeomElement),
    Site(SiteElement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeomElement {
    pub name: String,
    pub primitive: Primitive,
    pub pose: Pose,
    /// Object scale, read as primitive half-extents and radii
    pub scale: DVec3,
    pub visual: bool,
    pub collision: bool,
    pub material: Option<String>,
    /// Referenced mesh asset
    pub mesh: Option<String>,
}

impl GeomElement {
    /// MJCF size components for the primitive; meshes have none
    pub fn size_values(&self) -> Option<Vec<f64>> {
        let s = self.scale;
        match self.primitive {
            Primitive::Box | Primitive::Ellipsoid => Some(vec![s.x, s.y, s.z]),
            Primitive::Cylinder | Primitive::Capsule => Some(vec![s.y, s.z]),
            Primitive::Sphere => Some(vec![s.x]),
            Primitive::Mesh => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteElement {
    /// Object name followed by the site's index within its body
    pub name: String,
    pub pose: Pose,
    pub radius: f64,
}
