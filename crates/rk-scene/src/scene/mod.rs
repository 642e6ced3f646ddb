//! Scene: an ordered forest of objects plus material and image datablocks
//!
//! Object order is the host's scene order; child iteration and root
//! discovery preserve it.

mod graph;
mod transforms;

use std::collections::HashMap;

use uuid::Uuid;

use crate::material::{Image, Material};
use crate::object::SceneObject;

/// The host scene read by the exporters
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    index: HashMap<Uuid, usize>,
    name_index: HashMap<String, Uuid>,
    materials: Vec<Material>,
    images: Vec<Image>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an object by ID
    pub fn object(&self, id: Uuid) -> Option<&SceneObject> {
        self.index.get(&id).map(|&i| &self.objects[i])
    }

    /// Get a mutable object by ID
    ///
    /// Renaming through this handle desynchronizes the name index; use
    /// [`Scene::rename`] instead.
    pub fn object_mut(&mut self, id: Uuid) -> Option<&mut SceneObject> {
        self.index.get(&id).map(|&i| &mut self.objects[i])
    }

    /// Get an object by name
    pub fn object_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.name_index.get(name).and_then(|id| self.object(*id))
    }

    /// Get an object's ID by name
    pub fn id_of(&self, name: &str) -> Option<Uuid> {
        self.name_index.get(name).copied()
    }

    /// All objects in scene order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Add a material; a material with the same name is replaced
    pub fn add_material(&mut self, material: Material) {
        match self.materials.iter_mut().find(|m| m.name == material.name) {
            Some(existing) => *existing = material,
            None => self.materials.push(material),
        }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Add an image; an image with the same name is ignored
    pub fn add_image(&mut self, image: Image) {
        if !self.images.iter().any(|i| i.name == image.name) {
            self.images.push(image);
        }
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }
}
