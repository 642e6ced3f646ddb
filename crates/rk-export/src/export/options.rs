//! Export options
//!
//! Options are stored as RON next to the scene or passed in by the caller.
//! Missing fields fall back to their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::joint::AngleConversion;
use crate::target::{MjcfFormat, TargetFormat, UrdfFormat};

/// Default position actuator gain
pub const DEFAULT_ACTUATOR_KP: f64 = 2.0;

/// Output description format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExportFormat {
    #[default]
    Mjcf,
    Urdf,
}

impl ExportFormat {
    pub fn target(&self) -> Box<dyn TargetFormat> {
        match self {
            ExportFormat::Mjcf => Box::new(MjcfFormat),
            ExportFormat::Urdf => Box::new(UrdfFormat),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExportFormat::Mjcf => "MJCF",
            ExportFormat::Urdf => "URDF",
        }
    }
}

/// Options for one export run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Directory receiving one document per root and the mesh files
    pub output_dir: PathBuf,
    /// Write mesh files for mesh geometry
    pub export_meshes: bool,
    pub format: ExportFormat,
    /// Model name override; defaults to the output directory's name
    pub model_name: Option<String>,
    pub angle_conversion: AngleConversion,
    pub actuator_kp: f64,
    /// Prefix of mesh file references, relative to the output directory
    pub mesh_dir: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            export_meshes: false,
            format: ExportFormat::default(),
            model_name: None,
            angle_conversion: AngleConversion::default(),
            actuator_kp: DEFAULT_ACTUATOR_KP,
            mesh_dir: String::new(),
        }
    }
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_meshes(mut self, export_meshes: bool) -> Self {
        self.export_meshes = export_meshes;
        self
    }

    pub fn with_angle_conversion(mut self, conversion: AngleConversion) -> Self {
        self.angle_conversion = conversion;
        self
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Model name: the override, else the output directory's base name,
    /// else the root's name
    pub fn model_name_for(&self, root_name: &str) -> String {
        if let Some(name) = &self.model_name {
            return name.clone();
        }
        self.output_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| root_name.to_string())
    }

    /// Mesh file reference as written into documents (e.g. `meshes/arm.obj`)
    pub fn mesh_file(&self, object_name: &str) -> String {
        let dir = self.mesh_dir.trim_end_matches('/');
        if dir.is_empty() {
            format!("{object_name}.obj")
        } else {
            format!("{dir}/{object_name}.obj")
        }
    }

    /// Path where an object's mesh file is written
    pub fn mesh_path(&self, object_name: &str) -> PathBuf {
        self.output_dir.join(self.mesh_file(object_name))
    }

    /// Load options from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let options = ron::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tracing::info!("Loaded export options from {:?}", path);
        Ok(options)
    }

    /// Save options to a RON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;
        tracing::info!("Saved export options to {:?}", path);
        Ok(())
    }
}

/// Options file errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Failed to parse options: {0}")]
    Parse(String),
    #[error("Failed to serialize options: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert!(!options.export_meshes);
        assert_eq!(options.format, ExportFormat::Mjcf);
        assert_eq!(options.angle_conversion, AngleConversion::Legacy);
        assert_eq!(options.actuator_kp, 2.0);
    }

    #[test]
    fn test_mesh_file_prefix() {
        let mut options = ExportOptions::new("/tmp/out");
        assert_eq!(options.mesh_file("arm"), "arm.obj");

        options.mesh_dir = "meshes/".into();
        assert_eq!(options.mesh_file("arm"), "meshes/arm.obj");
        assert_eq!(options.mesh_path("arm"), PathBuf::from("/tmp/out/meshes/arm.obj"));
    }

    #[test]
    fn test_model_name_fallbacks() {
        assert_eq!(ExportOptions::new("/tmp/robots").model_name_for("base"), "robots");
        assert_eq!(ExportOptions::new(".").model_name_for("base"), "base");
        assert_eq!(
            ExportOptions::new("/tmp/robots").with_model_name("arm").model_name_for("base"),
            "arm"
        );
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let options: ExportOptions = ron::from_str("(format: Urdf, actuator_kp: 5.0)").unwrap();
        assert_eq!(options.format, ExportFormat::Urdf);
        assert_eq!(options.actuator_kp, 5.0);
        assert!(!options.export_meshes);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.ron");
        let options = ExportOptions::new("out")
            .with_format(ExportFormat::Urdf)
            .with_angle_conversion(AngleConversion::Exact)
            .with_model_name("robot");

        options.save(&path).unwrap();
        assert_eq!(ExportOptions::load(&path).unwrap(), options);
    }
}
