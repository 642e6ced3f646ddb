//! Mesh file side channel

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use glam::Vec3;
use rk_scene::SceneObject;

use crate::error::ExportError;

/// Writes an object's geometry to an interchange file
pub trait MeshExporter {
    fn export_mesh(&self, object: &SceneObject, path: &Path) -> Result<(), ExportError>;
}

/// Wavefront OBJ writer
///
/// The object's scale is baked into the vertices; its location, rotation
/// and parent are not, so the file is in the object's own frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjMeshExporter;

impl ObjMeshExporter {
    pub fn to_obj_string(&self, object: &SceneObject) -> Result<String, ExportError> {
        let mesh = object
            .mesh
            .as_ref()
            .filter(|m| !m.is_empty())
            .ok_or_else(|| mesh_error(object, "object has no mesh data"))?;

        if mesh.indices.len() % 3 != 0 {
            return Err(mesh_error(
                object,
                format!("index count {} is not a multiple of 3", mesh.indices.len()),
            ));
        }

        let scale = object.transform.scale.as_vec3();
        let mut out = String::new();
        writeln!(out, "o {}", object.name).map_err(|e| mesh_error(object, e))?;
        for v in &mesh.vertices {
            let p = Vec3::from(*v) * scale;
            writeln!(out, "v {} {} {}", p.x, p.y, p.z).map_err(|e| mesh_error(object, e))?;
        }

        let vertex_count = mesh.vertices.len() as u32;
        // OBJ indices are 1-based
        for tri in mesh.indices.chunks_exact(3) {
            if tri.iter().any(|i| *i >= vertex_count) {
                return Err(mesh_error(
                    object,
                    format!("triangle index out of range ({} vertices)", vertex_count),
                ));
            }
            writeln!(out, "f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1)
                .map_err(|e| mesh_error(object, e))?;
        }
        Ok(out)
    }
}

fn mesh_error(object: &SceneObject, reason: impl ToString) -> ExportError {
    ExportError::MeshExport {
        object: object.name.clone(),
        reason: reason.to_string(),
    }
}

impl MeshExporter for ObjMeshExporter {
    fn export_mesh(&self, object: &SceneObject, path: &Path) -> Result<(), ExportError> {
        let content = self.to_obj_string(object)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| mesh_error(object, e))?;
        }
        fs::write(path, content).map_err(|e| mesh_error(object, e))?;
        tracing::debug!("Wrote mesh '{}' to {:?}", object.name, path);
        Ok(())
    }
}
