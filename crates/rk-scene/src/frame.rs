//! Frame math: Euler conventions and parent-relative poses
//!
//! Rotation orders follow the authoring tool's naming: `Xyz` is the matrix
//! `Rz * Ry * Rx`, `Zyx` is `Rx * Ry * Rz`. Converting between them goes
//! through the rotation matrix, never by reordering angles.

use glam::{DMat3, DMat4, DVec3};

use crate::types::{EulerOrder, Pose};

/// Above this |sin(middle angle)| the decomposition is treated as gimbal locked
const GIMBAL_THRESHOLD: f64 = 1.0 - 1e-12;

/// Compose a rotation matrix from Euler angles (radians)
pub fn euler_to_mat3(order: EulerOrder, angles: DVec3) -> DMat3 {
    let rx = DMat3::from_rotation_x(angles.x);
    let ry = DMat3::from_rotation_y(angles.y);
    let rz = DMat3::from_rotation_z(angles.z);
    match order {
        EulerOrder::Xyz => rz * ry * rx,
        EulerOrder::Zyx => rx * ry * rz,
    }
}

/// Extract Euler angles (radians) in the given order from a rotation matrix
pub fn mat3_to_euler(order: EulerOrder, m: DMat3) -> DVec3 {
    // glam is column-major: r(row, col) = m.col(col)[row]
    let r = |row: usize, col: usize| m.col(col)[row];

    match order {
        EulerOrder::Xyz => {
            // R = Rz(c) Ry(b) Rx(a): r20 = -sin b
            let sb = -r(2, 0);
            if sb.abs() >= GIMBAL_THRESHOLD {
                let b = sb.clamp(-1.0, 1.0).asin();
                DVec3::new(0.0, b, (-r(0, 1)).atan2(r(1, 1)))
            } else {
                DVec3::new(r(2, 1).atan2(r(2, 2)), sb.asin(), r(1, 0).atan2(r(0, 0)))
            }
        }
        EulerOrder::Zyx => {
            // R = Rx(a) Ry(b) Rz(c): r02 = sin b
            let sb = r(0, 2);
            if sb.abs() >= GIMBAL_THRESHOLD {
                let b = sb.clamp(-1.0, 1.0).asin();
                DVec3::new(r(2, 1).atan2(r(1, 1)), b, 0.0)
            } else {
                DVec3::new(
                    (-r(1, 2)).atan2(r(2, 2)),
                    sb.asin(),
                    (-r(0, 1)).atan2(r(0, 0)),
                )
            }
        }
    }
}

/// Re-express Euler angles in another rotation order
pub fn convert_euler(angles: DVec3, from: EulerOrder, to: EulerOrder) -> DVec3 {
    if from == to {
        return angles;
    }
    mat3_to_euler(to, euler_to_mat3(from, angles))
}

/// Convert authoring XYZ Euler angles to the ZYX order MJCF expects
pub fn xyz_to_zyx(angles: DVec3) -> DVec3 {
    convert_euler(angles, EulerOrder::Xyz, EulerOrder::Zyx)
}

/// Pose of `child_world` expressed in the frame of `parent_world`
///
/// The position is the child's world translation pulled through the inverse
/// of the full parent matrix (scale included). The orientation is the
/// relative rotation with scale factored out of both matrices.
pub fn relative_pose(parent_world: &DMat4, child_world: &DMat4) -> Pose {
    let position = parent_world
        .inverse()
        .transform_point3(child_world.w_axis.truncate());

    let (_, parent_rotation, _) = parent_world.to_scale_rotation_translation();
    let (_, child_rotation, _) = child_world.to_scale_rotation_translation();
    let rotation = DMat3::from_quat((parent_rotation.inverse() * child_rotation).normalize());

    Pose::new(position, rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_mat_eq(a: DMat3, b: DMat3) {
        for col in 0..3 {
            for row in 0..3 {
                assert_relative_eq!(a.col(col)[row], b.col(col)[row], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_identity_roundtrip() {
        let zyx = xyz_to_zyx(DVec3::ZERO);
        assert_eq!(zyx.abs(), DVec3::ZERO);
    }

    #[test]
    fn test_single_axis_rotations_unchanged() {
        for angles in [
            DVec3::new(FRAC_PI_2, 0.0, 0.0),
            DVec3::new(0.0, FRAC_PI_2, 0.0),
            DVec3::new(0.0, 0.0, FRAC_PI_2),
        ] {
            let zyx = xyz_to_zyx(angles);
            assert_relative_eq!(zyx.x, angles.x, epsilon = 1e-12);
            assert_relative_eq!(zyx.y, angles.y, epsilon = 1e-12);
            assert_relative_eq!(zyx.z, angles.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_compound_rotation_preserves_matrix() {
        let xyz = DVec3::new(0.3, -0.7, 1.2);
        let zyx = xyz_to_zyx(xyz);

        // Different numbers, same physical orientation
        assert!((zyx - xyz).length() > 1e-3);
        assert_mat_eq(
            euler_to_mat3(EulerOrder::Xyz, xyz),
            euler_to_mat3(EulerOrder::Zyx, zyx),
        );
    }

    #[test]
    fn test_conversion_is_not_angle_reversal() {
        let xyz = DVec3::new(0.4, 0.2, -0.9);
        let reversed = DVec3::new(xyz.z, xyz.y, xyz.x);
        let zyx = xyz_to_zyx(xyz);
        assert!((zyx - reversed).length() > 1e-3);
    }

    #[test]
    fn test_xyz_extraction_roundtrip() {
        let angles = DVec3::new(-0.5, 0.25, 2.0);
        let m = euler_to_mat3(EulerOrder::Xyz, angles);
        let back = mat3_to_euler(EulerOrder::Xyz, m);
        assert_relative_eq!(back.x, angles.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, angles.y, epsilon = 1e-9);
        assert_relative_eq!(back.z, angles.z, epsilon = 1e-9);
    }

    #[test]
    fn test_gimbal_lock_preserves_matrix() {
        let xyz = DVec3::new(0.3, FRAC_PI_2, 0.6);
        let zyx = xyz_to_zyx(xyz);
        assert_mat_eq(
            euler_to_mat3(EulerOrder::Xyz, xyz),
            euler_to_mat3(EulerOrder::Zyx, zyx),
        );
    }

    #[test]
    fn test_relative_pose_translation() {
        let parent = DMat4::from_translation(DVec3::new(1.0, 0.0, 0.0));
        let child = DMat4::from_translation(DVec3::new(1.0, 1.0, 0.0));

        let pose = relative_pose(&parent, &child);
        assert_relative_eq!(pose.position.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pose.position.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(pose.position.z, 0.0, epsilon = 1e-12);
        assert_mat_eq(pose.rotation, DMat3::IDENTITY);
    }

    #[test]
    fn test_relative_pose_rotated_parent() {
        // Parent turned 90 degrees about Z: its local +X points along world +Y
        let parent = DMat4::from_rotation_z(FRAC_PI_2);
        let child = DMat4::from_translation(DVec3::new(0.0, 2.0, 0.0));

        let pose = relative_pose(&parent, &child);
        assert_relative_eq!(pose.position.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(pose.position.y, 0.0, epsilon = 1e-9);
        assert_mat_eq(pose.rotation, DMat3::from_rotation_z(-FRAC_PI_2));
    }

    #[test]
    fn test_relative_pose_scaled_parent() {
        let parent = DMat4::from_scale(DVec3::splat(2.0));
        let child = DMat4::from_translation(DVec3::new(4.0, 0.0, 0.0));

        let pose = relative_pose(&parent, &child);
        assert_relative_eq!(pose.position.x, 2.0, epsilon = 1e-12);
        assert_mat_eq(pose.rotation, DMat3::IDENTITY);
    }
}
