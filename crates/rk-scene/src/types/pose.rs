//! Pose type definition

use glam::{DMat3, DVec3};

use super::EulerOrder;
use crate::frame::mat3_to_euler;

/// Pose (position and orientation) expressed in some parent frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: DVec3,
    pub rotation: DMat3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        rotation: DMat3::IDENTITY,
    };

    pub fn new(position: DVec3, rotation: DMat3) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            rotation: DMat3::IDENTITY,
        }
    }

    /// Orientation as Euler angles in the given order (radians)
    pub fn euler(&self, order: EulerOrder) -> DVec3 {
        mat3_to_euler(order, self.rotation)
    }
}
