//! Export errors

use rk_scene::{Primitive, SceneError};

/// Errors that can occur while exporting a description
///
/// Errors about a single object fail only the root document being built.
/// [`ExportError::is_fatal`] errors abort the whole run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("Object '{object}' is missing required annotation field '{field}'")]
    MissingAnnotation { object: String, field: &'static str },

    #[error("Object '{object}' references undeclared {kind} '{name}'")]
    UnresolvedReference {
        kind: &'static str,
        name: String,
        object: String,
    },

    #[error("Joint name '{name}' on object '{object}' is already used in this tree")]
    DuplicateJoint { name: String, object: String },

    #[error("Cyclic parent graph detected at object '{0}'")]
    CyclicParentGraph(String),

    #[error("{format} cannot represent {primitive} geometry (object '{object}')")]
    UnsupportedPrimitive {
        format: &'static str,
        primitive: Primitive,
        object: String,
    },

    #[error("Output directory '{path}' is not usable: {reason}")]
    OutputDir { path: String, reason: String },

    #[error("IO error writing '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Mesh export failed for '{object}': {reason}")]
    MeshExport { object: String, reason: String },

    #[error("Root object not found: '{0}'")]
    RootNotFound(String),

    #[error("Scene error: {0}")]
    Scene(SceneError),
}

impl ExportError {
    /// Whether the error aborts the whole export rather than one root
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ExportError::CyclicParentGraph(_) | ExportError::OutputDir { .. } | ExportError::Scene(_)
        )
    }
}

impl From<SceneError> for ExportError {
    fn from(error: SceneError) -> Self {
        match error {
            SceneError::CyclicParentGraph(name) => ExportError::CyclicParentGraph(name),
            other => ExportError::Scene(other),
        }
    }
}
