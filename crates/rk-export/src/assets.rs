//! Asset registry
//!
//! Collects the textures, materials, meshes and actuators a document
//! declares. The registry is built from the scene for every document, so
//! building it twice yields the same declarations in the same order.

use rk_scene::{ExportKind, Scene};

use crate::classify::exports_mesh;
use crate::export::ExportOptions;
use crate::joint::ActuatorSpec;

/// Material applied through the collision default class
pub const COLLISION_MATERIAL: &str = "collision";

/// Materials that never become assets
pub const EXCLUDED_MATERIALS: &[&str] = &[COLLISION_MATERIAL, "Dots Stroke"];

/// Image extensions exported as textures
pub const TEXTURE_EXTENSIONS: &[&str] = &["png"];

pub const COLLISION_RGBA: [f64; 4] = [0.3, 0.3, 1.0, 0.5];

#[derive(Debug, Clone, PartialEq)]
pub struct TextureAsset {
    /// Image name without extension
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialAsset {
    pub name: String,
    pub rgba: [f64; 4],
    pub shininess: Option<f64>,
    /// Name of a declared texture
    pub texture: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshAsset {
    /// Name of the object owning the mesh
    pub name: String,
    pub file: String,
}

/// Declarations shared by every document of one export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetRegistry {
    pub textures: Vec<TextureAsset>,
    pub materials: Vec<MaterialAsset>,
    pub meshes: Vec<MeshAsset>,
    pub actuators: Vec<ActuatorSpec>,
    pub warnings: Vec<String>,
}

impl AssetRegistry {
    pub fn build(scene: &Scene, options: &ExportOptions) -> Self {
        let mut registry = Self::default();
        registry.collect_textures(scene);
        registry.collect_materials(scene);

        for object in scene.objects() {
            if exports_mesh(object) {
                registry.meshes.push(MeshAsset {
                    name: object.name.clone(),
                    file: options.mesh_file(&object.name),
                });
            }
            if object.annotation.kind == ExportKind::Link
                && let Some(joint) = &object.annotation.joint
                && let Some(actuator) =
                    ActuatorSpec::from_annotation(object, joint, options.angle_conversion)
            {
                registry.actuators.push(actuator);
            }
        }

        tracing::debug!(
            "Collected {} textures, {} materials, {} meshes, {} actuators",
            registry.textures.len(),
            registry.materials.len(),
            registry.meshes.len(),
            registry.actuators.len()
        );
        registry
    }

    fn collect_textures(&mut self, scene: &Scene) {
        for image in scene.images() {
            let recognized = image
                .extension()
                .is_some_and(|ext| TEXTURE_EXTENSIONS.contains(&ext.as_str()));
            if recognized && self.texture(image.stem()).is_none() {
                self.textures.push(TextureAsset {
                    name: image.stem().to_string(),
                    file: image.name.clone(),
                });
            }
        }
    }

    fn collect_materials(&mut self, scene: &Scene) {
        self.materials.push(MaterialAsset {
            name: COLLISION_MATERIAL.to_string(),
            rgba: COLLISION_RGBA,
            shininess: None,
            texture: None,
        });

        for material in scene.materials() {
            if EXCLUDED_MATERIALS.contains(&material.name.as_str())
                || self.material(&material.name).is_some()
            {
                continue;
            }

            let texture = match material.image_texture() {
                Some(image) => {
                    let stem = std::path::Path::new(image)
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or(image);
                    if self.texture(stem).is_some() {
                        Some(stem.to_string())
                    } else {
                        let warning = format!(
                            "Material '{}' uses image '{}' which is not an exportable texture",
                            material.name, image
                        );
                        tracing::warn!("{}", warning);
                        self.warnings.push(warning);
                        None
                    }
                }
                None => None,
            };

            self.materials.push(MaterialAsset {
                name: material.name.clone(),
                rgba: material.diffuse_color,
                shininess: Some(material.specular_intensity),
                texture,
            });
        }
    }

    pub fn material(&self, name: &str) -> Option<&MaterialAsset> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn texture(&self, name: &str) -> Option<&TextureAsset> {
        self.textures.iter().find(|t| t.name == name)
    }

    pub fn mesh(&self, name: &str) -> Option<&MeshAsset> {
        self.meshes.iter().find(|m| m.name == name)
    }
}
