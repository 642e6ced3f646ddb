//! Reverse import
//!
//! Reads bodies and geoms back from an exported (or hand-edited) MJCF or
//! URDF file and applies them to objects that already exist in the scene:
//! geoms are resized from their size values and re-parented under the
//! object named like their body. Nothing is created; unknown names are
//! reported.

mod include;
mod mjcf;
mod urdf;

pub use include::{expand_includes, read_with_includes};
pub use mjcf::{parse_mjcf_str, read_mjcf};
pub use urdf::{parse_urdf_str, read_urdf};

use std::path::Path;

use glam::DVec3;
use rk_scene::{Scene, SceneError};

/// Geometry read from a model file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedGeom {
    pub name: Option<String>,
    /// Size values in MJCF convention (half-extents, radius, half-length)
    pub size: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedBody {
    pub name: String,
    pub geoms: Vec<ImportedGeom>,
}

/// Bodies of a model file, document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedModel {
    pub bodies: Vec<ImportedBody>,
}

impl ImportedModel {
    pub fn geom_count(&self) -> usize {
        self.bodies.iter().map(|b| b.geoms.len()).sum()
    }
}

/// What applying a model changed
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub resized: Vec<String>,
    pub parented: Vec<String>,
    /// Geom names with no scene object
    pub missing: Vec<String>,
    pub warnings: Vec<String>,
}

/// Reverse import errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportError {
    #[error("IO error reading '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Include error: {0}")]
    Include(String),

    #[error("Failed to parse URDF: {0}")]
    Urdf(String),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Read a model file, choosing the reader by extension (`.urdf` or MJCF)
pub fn read_model(path: &Path) -> Result<ImportedModel, ImportError> {
    let is_urdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("urdf"));
    if is_urdf { read_urdf(path) } else { read_mjcf(path) }
}

/// Scale for a size tuple: 3 values → xyz, 2 → radius/radius/height, 1 → uniform
pub fn scale_from_size(size: &[f64]) -> Option<DVec3> {
    match *size {
        [x, y, z] => Some(DVec3::new(x, y, z)),
        [radius, height] => Some(DVec3::new(radius, radius, height)),
        [s] => Some(DVec3::splat(s)),
        _ => None,
    }
}

/// Resize and re-parent existing scene objects from an imported model
pub fn apply_to_scene(scene: &mut Scene, model: &ImportedModel) -> ImportReport {
    let mut report = ImportReport::default();

    for body in &model.bodies {
        let body_id = scene.id_of(&body.name);

        for geom in &body.geoms {
            let Some(name) = &geom.name else {
                continue;
            };
            let Some(geom_id) = scene.id_of(name) else {
                tracing::debug!("No scene object named '{}'", name);
                report.missing.push(name.clone());
                continue;
            };

            if let Some(scale) = scale_from_size(&geom.size)
                && let Some(object) = scene.object_mut(geom_id)
            {
                object.transform.scale = scale;
                report.resized.push(name.clone());
            }

            let Some(body_id) = body_id else {
                continue;
            };
            let already_parented = scene
                .object(geom_id)
                .is_some_and(|o| o.parent == Some(body_id));
            if body_id == geom_id || already_parented {
                continue;
            }
            match scene.reparent_keep_world(geom_id, body_id) {
                Ok(()) => report.parented.push(name.clone()),
                Err(e) => {
                    tracing::warn!("Could not parent '{}' under '{}': {}", name, body.name, e);
                    report.warnings.push(e.to_string());
                }
            }
        }
    }

    tracing::info!(
        "Import applied: {} resized, {} parented, {} missing",
        report.resized.len(),
        report.parented.len(),
        report.missing.len()
    );
    report
}
