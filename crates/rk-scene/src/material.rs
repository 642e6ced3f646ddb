//! Materials and images referenced by scene objects

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Node of a material's shading graph; only image textures matter for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShaderNode {
    ImageTexture { image: String },
    Other(String),
}

/// Surface material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub name: String,
    /// RGBA
    pub diffuse_color: [f64; 4],
    pub specular_intensity: f64,
    pub nodes: Vec<ShaderNode>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            diffuse_color: [0.8, 0.8, 0.8, 1.0],
            specular_intensity: 0.5,
            nodes: Vec::new(),
        }
    }
}

impl Material {
    pub fn new(name: impl Into<String>, diffuse_color: [f64; 4]) -> Self {
        Self {
            name: name.into(),
            diffuse_color,
            ..Self::default()
        }
    }

    pub fn with_image_texture(mut self, image: impl Into<String>) -> Self {
        self.nodes.push(ShaderNode::ImageTexture {
            image: image.into(),
        });
        self
    }

    /// Image of the first image-texture node in the shading graph
    pub fn image_texture(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            ShaderNode::ImageTexture { image } => Some(image.as_str()),
            ShaderNode::Other(_) => None,
        })
    }
}

/// Image datablock; the name is the external file name (e.g. `wood.png`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub name: String,
}

impl Image {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Lowercased file extension, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }

    /// File name without its extension
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_texture_lookup() {
        let material = Material::new("wood", [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(material.image_texture(), None);

        let mut material = material.with_image_texture("grain.png");
        material.nodes.insert(0, ShaderNode::Other("Principled BSDF".into()));
        assert_eq!(material.image_texture(), Some("grain.png"));
    }

    #[test]
    fn test_image_stem_and_extension() {
        let image = Image::new("Grain.PNG");
        assert_eq!(image.stem(), "Grain");
        assert_eq!(image.extension().as_deref(), Some("png"));
        assert_eq!(Image::new("noext").extension(), None);
    }
}
