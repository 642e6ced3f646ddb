//! Per-object export annotation set by the editor

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::types::JointAnnotation;

/// What an object becomes in the exported description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExportKind {
    #[default]
    None,
    Link,
    Geom,
    Light,
    Collision,
    Site,
}

/// Primitive shape of a geometry object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Box,
    Mesh,
    Cylinder,
    Capsule,
    Sphere,
    Ellipsoid,
}

impl Primitive {
    /// Tag used in MJCF `type` attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Box => "box",
            Primitive::Mesh => "mesh",
            Primitive::Cylinder => "cylinder",
            Primitive::Capsule => "capsule",
            Primitive::Sphere => "sphere",
            Primitive::Ellipsoid => "ellipsoid",
        }
    }

    pub fn all() -> &'static [Primitive] {
        &[
            Primitive::Box,
            Primitive::Mesh,
            Primitive::Cylinder,
            Primitive::Capsule,
            Primitive::Sphere,
            Primitive::Ellipsoid,
        ]
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Primitive {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Primitive::all()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SceneError::UnknownPrimitive(s.to_string()))
    }
}

/// Export annotation attached 1:1 to a scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Annotation {
    pub kind: ExportKind,
    /// Meaningful for `Geom` and `Collision` objects
    pub primitive: Option<Primitive>,
    pub is_collision: bool,
    /// Present when the link carries a joint
    pub joint: Option<JointAnnotation>,
}

impl Annotation {
    pub fn link() -> Self {
        Self {
            kind: ExportKind::Link,
            ..Self::default()
        }
    }

    pub fn geom(primitive: Primitive) -> Self {
        Self {
            kind: ExportKind::Geom,
            primitive: Some(primitive),
            ..Self::default()
        }
    }

    pub fn collision(primitive: Primitive) -> Self {
        Self {
            kind: ExportKind::Collision,
            primitive: Some(primitive),
            ..Self::default()
        }
    }

    pub fn site() -> Self {
        Self {
            kind: ExportKind::Site,
            ..Self::default()
        }
    }

    pub fn light() -> Self {
        Self {
            kind: ExportKind::Light,
            ..Self::default()
        }
    }

    pub fn with_joint(mut self, joint: JointAnnotation) -> Self {
        self.joint = Some(joint);
        self
    }

    pub fn with_collision_flag(mut self) -> Self {
        self.is_collision = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_from_str() {
        assert_eq!("box".parse::<Primitive>().unwrap(), Primitive::Box);
        assert_eq!("Capsule".parse::<Primitive>().unwrap(), Primitive::Capsule);
        assert!(matches!(
            "plane".parse::<Primitive>(),
            Err(SceneError::UnknownPrimitive(_))
        ));
    }
}
