//! Local transform and rotation representation

use glam::{DMat3, DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::frame::euler_to_mat3;

/// Euler rotation order, named in application order
///
/// `Xyz` applies X first, then Y, then Z (matrix `Rz * Ry * Rx`), the
/// authoring convention. `Zyx` applies Z first (matrix `Rx * Ry * Rz`), the
/// convention MJCF reads with its default `eulerseq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EulerOrder {
    #[default]
    Xyz,
    Zyx,
}

/// Stored rotation of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rotation {
    Euler { order: EulerOrder, angles: DVec3 },
    Quaternion(DQuat),
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Euler {
            order: EulerOrder::Xyz,
            angles: DVec3::ZERO,
        }
    }
}

impl Rotation {
    /// XYZ Euler angles in radians
    pub fn euler_xyz(x: f64, y: f64, z: f64) -> Self {
        Rotation::Euler {
            order: EulerOrder::Xyz,
            angles: DVec3::new(x, y, z),
        }
    }

    pub fn to_mat3(&self) -> DMat3 {
        match *self {
            Rotation::Euler { order, angles } => euler_to_mat3(order, angles),
            Rotation::Quaternion(q) => DMat3::from_quat(q.normalize()),
        }
    }
}

/// Local transform (location, rotation, scale) relative to the parent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub location: DVec3,
    pub rotation: Rotation,
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: DVec3::ZERO,
            rotation: Rotation::default(),
            scale: DVec3::ONE,
        }
    }
}

impl Transform {
    /// Compose translation * rotation * scale
    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_translation(self.location)
            * DMat4::from_mat3(self.rotation.to_mat3())
            * DMat4::from_scale(self.scale)
    }
}
