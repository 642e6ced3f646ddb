//! Scene errors

use uuid::Uuid;

/// Scene graph and scene file errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SceneError {
    #[error("Object not found: {0}")]
    ObjectNotFound(Uuid),

    #[error("Object not found: '{0}'")]
    ObjectNameNotFound(String),

    #[error("Object name already in use: '{0}'")]
    DuplicateName(String),

    #[error("Parent of '{child}' is not in the scene")]
    MissingParent { child: String },

    #[error("Parenting '{child}' under '{parent}' would create a cycle")]
    WouldCreateCycle { child: String, parent: String },

    #[error("Cyclic parent graph detected at object '{0}'")]
    CyclicParentGraph(String),

    #[error("Unknown primitive: '{0}'")]
    UnknownPrimitive(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to parse scene file: {0}")]
    Parse(String),

    #[error("Failed to serialize scene: {0}")]
    Serialize(String),
}
