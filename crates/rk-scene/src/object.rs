//! Scene object definitions

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::annotation::Annotation;
use crate::types::{Rotation, Transform};

/// Host object type (what kind of data the object carries)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum ObjectType {
    #[default]
    Mesh,
    Empty,
    Light(LightData),
    Camera,
}

/// Light payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightData {
    /// Linear RGB color
    pub color: [f64; 3],
}

impl Default for LightData {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Triangle mesh owned by an object, in object-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MeshData {
    pub vertices: Vec<[f32; 3]>,
    /// Three indices per triangle
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.len() < 3
    }
}

/// An object in the host scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: Uuid,
    /// Unique within the scene
    pub name: String,
    pub object_type: ObjectType,
    pub parent: Option<Uuid>,
    /// Inverse of the parent's world matrix captured at parenting time
    pub parent_inverse: DMat4,
    pub transform: Transform,
    pub mesh: Option<MeshData>,
    /// Material slots, first slot is the one exported
    pub materials: Vec<String>,
    pub annotation: Annotation,
}

impl SceneObject {
    /// Create a new unparented object at the origin
    pub fn new(name: impl Into<String>, object_type: ObjectType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            object_type,
            parent: None,
            parent_inverse: DMat4::IDENTITY,
            transform: Transform::default(),
            mesh: None,
            materials: Vec::new(),
            annotation: Annotation::default(),
        }
    }

    /// Create an empty (no data) object
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, ObjectType::Empty)
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = annotation;
        self
    }

    pub fn with_location(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transform.location = DVec3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transform.scale = DVec3::new(x, y, z);
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.materials.push(material.into());
        self
    }

    pub fn with_mesh(mut self, mesh: MeshData) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Material in the first slot
    pub fn primary_material(&self) -> Option<&str> {
        self.materials.first().map(String::as_str)
    }

    pub fn is_camera(&self) -> bool {
        matches!(self.object_type, ObjectType::Camera)
    }

    pub fn light_data(&self) -> Option<&LightData> {
        match &self.object_type {
            ObjectType::Light(data) => Some(data),
            _ => None,
        }
    }
}
