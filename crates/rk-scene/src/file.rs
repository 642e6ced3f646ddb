//! Scene description files (RON or JSON)
//!
//! Objects reference their parent by name so files stay hand-editable.
//! The format is picked from the file extension: `.json` is JSON, anything
//! else is RON.

use std::path::Path;

use glam::DMat4;
use serde::{Deserialize, Serialize};

use crate::annotation::Annotation;
use crate::error::SceneError;
use crate::material::{Image, Material};
use crate::object::{MeshData, ObjectType, SceneObject};
use crate::scene::Scene;
use crate::types::Transform;

/// Serializable scene description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneFile {
    pub objects: Vec<ObjectEntry>,
    pub materials: Vec<Material>,
    pub images: Vec<Image>,
}

/// One object of a scene file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub name: String,
    #[serde(default)]
    pub object_type: ObjectType,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default = "identity")]
    pub parent_inverse: DMat4,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub mesh: Option<MeshData>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub annotation: Annotation,
}

fn identity() -> DMat4 {
    DMat4::IDENTITY
}

impl Scene {
    /// Build a scene from a description; parents may appear after children
    pub fn from_file(file: SceneFile) -> Result<Self, SceneError> {
        let mut scene = Scene::new();
        let mut links = Vec::new();

        for entry in file.objects {
            let mut object = SceneObject::new(entry.name, entry.object_type);
            object.transform = entry.transform;
            object.mesh = entry.mesh;
            object.materials = entry.materials;
            object.annotation = entry.annotation;
            let id = scene.add_object(object)?;
            if let Some(parent) = entry.parent {
                links.push((id, parent, entry.parent_inverse));
            }
        }

        for (id, parent_name, parent_inverse) in links {
            let parent = scene
                .id_of(&parent_name)
                .ok_or(SceneError::ObjectNameNotFound(parent_name))?;
            scene.set_parent(id, Some(parent))?;
            if let Some(object) = scene.object_mut(id) {
                object.parent_inverse = parent_inverse;
            }
        }

        for material in file.materials {
            scene.add_material(material);
        }
        for image in file.images {
            scene.add_image(image);
        }

        Ok(scene)
    }

    /// Describe the scene for serialization
    pub fn to_file(&self) -> SceneFile {
        let objects = self
            .objects()
            .iter()
            .map(|object| ObjectEntry {
                name: object.name.clone(),
                object_type: object.object_type.clone(),
                parent: object
                    .parent
                    .and_then(|p| self.object(p))
                    .map(|p| p.name.clone()),
                parent_inverse: object.parent_inverse,
                transform: object.transform,
                mesh: object.mesh.clone(),
                materials: object.materials.clone(),
                annotation: object.annotation.clone(),
            })
            .collect();

        SceneFile {
            objects,
            materials: self.materials().to_vec(),
            images: self.images().to_vec(),
        }
    }

    /// Load a scene description from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SceneError::Io(e.to_string()))?;
        let file: SceneFile = if is_json(path) {
            serde_json::from_str(&content).map_err(|e| SceneError::Parse(e.to_string()))?
        } else {
            ron::from_str(&content).map_err(|e| SceneError::Parse(e.to_string()))?
        };
        tracing::debug!("Loaded {} objects from {:?}", file.objects.len(), path);
        Self::from_file(file)
    }

    /// Save the scene description to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let file = self.to_file();
        let content = if is_json(path) {
            serde_json::to_string_pretty(&file).map_err(|e| SceneError::Serialize(e.to_string()))?
        } else {
            ron::ser::to_string_pretty(&file, ron::ser::PrettyConfig::default())
                .map_err(|e| SceneError::Serialize(e.to_string()))?
        };
        std::fs::write(path, content).map_err(|e| SceneError::Io(e.to_string()))?;
        tracing::info!("Saved scene to {:?}", path);
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{ExportKind, Primitive};

    const SCENE: &str = r#"(
        objects: [
            (
                name: "box1",
                parent: Some("base"),
                transform: (
                    location: (0.0, 0.0, 1.0),
                    rotation: Euler(order: Xyz, angles: (0.0, 0.0, 0.0)),
                    scale: (2.0, 1.0, 1.0),
                ),
                annotation: (kind: Geom, primitive: Some(box)),
            ),
            (
                name: "base",
                object_type: Empty,
                annotation: (kind: Link),
            ),
        ],
        materials: [(name: "steel", diffuse_color: (0.5, 0.5, 0.5, 1.0))],
    )"#;

    #[test]
    fn test_parse_ron_scene_with_forward_parent() {
        let file: SceneFile = ron::from_str(SCENE).unwrap();
        let scene = Scene::from_file(file).unwrap();

        let base = scene.object_by_name("base").unwrap();
        let box1 = scene.object_by_name("box1").unwrap();
        assert_eq!(box1.parent, Some(base.id));
        assert_eq!(base.annotation.kind, ExportKind::Link);
        assert_eq!(box1.annotation.primitive, Some(Primitive::Box));
        assert_eq!(box1.transform.scale.x, 2.0);
        assert_eq!(scene.materials().len(), 1);
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let file = SceneFile {
            objects: vec![ObjectEntry {
                name: "orphan".into(),
                object_type: ObjectType::Empty,
                parent: Some("nobody".into()),
                parent_inverse: DMat4::IDENTITY,
                transform: Transform::default(),
                mesh: None,
                materials: Vec::new(),
                annotation: Annotation::default(),
            }],
            ..SceneFile::default()
        };
        assert!(matches!(
            Scene::from_file(file),
            Err(SceneError::ObjectNameNotFound(name)) if name == "nobody"
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_hierarchy() {
        let file: SceneFile = ron::from_str(SCENE).unwrap();
        let scene = Scene::from_file(file).unwrap();

        let json = serde_json::to_string(&scene.to_file()).unwrap();
        let reloaded = Scene::from_file(serde_json::from_str(&json).unwrap()).unwrap();

        let base = reloaded.object_by_name("base").unwrap();
        assert_eq!(reloaded.object_by_name("box1").unwrap().parent, Some(base.id));
    }
}
