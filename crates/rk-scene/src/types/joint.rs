//! Joint-related type definitions

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Joint type as annotated in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JointKind {
    /// Rotation about the axis (MJCF `hinge`, URDF `revolute`)
    #[default]
    Hinge,
    /// Translation along the axis (MJCF `slide`, URDF `prismatic`)
    Slide,
    /// MJCF `ball`, exported as `fixed` in URDF
    Ball,
}

/// Joint axis choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JointAxis {
    #[default]
    X,
    Y,
    Z,
}

impl JointAxis {
    pub fn unit(&self) -> DVec3 {
        match self {
            JointAxis::X => DVec3::X,
            JointAxis::Y => DVec3::Y,
            JointAxis::Z => DVec3::Z,
        }
    }
}

/// Joint fields attached to a link object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JointAnnotation {
    pub kind: JointKind,
    pub axis: JointAxis,
    /// Explicit joint name; empty or `"joint"` means derive from the object
    pub name: Option<String>,
    /// Lower range in editor units (degrees-like for angular joints)
    pub range_min: f64,
    /// Upper range in editor units
    pub range_max: f64,
}

impl JointAnnotation {
    pub fn new(kind: JointKind, axis: JointAxis) -> Self {
        Self {
            kind,
            axis,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range_min = min;
        self.range_max = max;
        self
    }

    /// Explicit name if it is set and not the editor placeholder
    pub fn explicit_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty() && *n != "joint")
    }
}
