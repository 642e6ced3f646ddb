//! World transform and relative pose calculations for Scene

use glam::DMat4;
use uuid::Uuid;

use super::Scene;
use crate::error::SceneError;
use crate::frame;
use crate::object::SceneObject;
use crate::types::Pose;

impl Scene {
    /// Get the world transform of an object
    ///
    /// `world = parent_world * parent_inverse * local`, walked from the root.
    pub fn world_matrix(&self, id: Uuid) -> Result<DMat4, SceneError> {
        let mut chain = Vec::new();
        let mut current = Some(id);

        // Build chain from object to root
        while let Some(object_id) = current {
            let object = self
                .object(object_id)
                .ok_or(SceneError::ObjectNotFound(object_id))?;
            if chain.len() > self.objects.len() {
                return Err(SceneError::CyclicParentGraph(object.name.clone()));
            }
            chain.push(object);
            current = object.parent;
        }

        // Apply transforms from root to object
        let mut transform = DMat4::IDENTITY;
        for object in chain.into_iter().rev() {
            let local = object.transform.to_mat4();
            transform = if object.parent.is_some() {
                transform * object.parent_inverse * local
            } else {
                local
            };
        }

        Ok(transform)
    }

    /// Pose of `child` relative to the body frame of `parent`
    ///
    /// Without a parent the object's own local transform passes through.
    /// With one, the pose comes from both world matrices, so any objects in
    /// between (and parent-inverse matrices) are accounted for.
    pub fn relative_pose(
        &self,
        parent: Option<&SceneObject>,
        child: &SceneObject,
    ) -> Result<Pose, SceneError> {
        match parent {
            None => Ok(Pose::new(
                child.transform.location,
                child.transform.rotation.to_mat3(),
            )),
            Some(parent) => {
                let parent_world = self.world_matrix(parent.id)?;
                let child_world = self.world_matrix(child.id)?;
                Ok(frame::relative_pose(&parent_world, &child_world))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;
    use approx::assert_relative_eq;
    use glam::DVec3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_relative_pose_uses_world_translation() {
        let mut scene = Scene::new();
        let parent = scene
            .add_object(SceneObject::empty("p").with_location(1.0, 0.0, 0.0))
            .unwrap();
        // Local offset (0, 1, 0) under p puts the child at world (1, 1, 0)
        let child = scene
            .add_child(parent, SceneObject::empty("c").with_location(0.0, 1.0, 0.0))
            .unwrap();

        let world = scene.world_matrix(child).unwrap();
        assert_relative_eq!(world.w_axis.x, 1.0);
        assert_relative_eq!(world.w_axis.y, 1.0);

        let pose = scene
            .relative_pose(scene.object(parent), scene.object(child).unwrap())
            .unwrap();
        assert_relative_eq!(pose.position.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pose.position.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(pose.position.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_relative_pose_through_intermediate() {
        let mut scene = Scene::new();
        let body = scene.add_object(SceneObject::empty("body")).unwrap();
        let group = scene
            .add_child(body, SceneObject::empty("group").with_location(0.0, 0.0, 2.0))
            .unwrap();
        let geom = scene
            .add_child(group, SceneObject::empty("geom").with_location(1.0, 0.0, 0.0))
            .unwrap();

        let pose = scene
            .relative_pose(scene.object(body), scene.object(geom).unwrap())
            .unwrap();
        assert_relative_eq!(pose.position.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(pose.position.z, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_root_pose_passes_through() {
        let object = SceneObject::empty("root")
            .with_location(0.5, -1.0, 3.0)
            .with_rotation(Rotation::euler_xyz(0.0, 0.0, FRAC_PI_2));
        let scene = Scene::new();
        let pose = scene.relative_pose(None, &object).unwrap();
        assert_eq!(pose.position, DVec3::new(0.5, -1.0, 3.0));
        assert_eq!(pose.rotation, object.transform.rotation.to_mat3());
    }

    #[test]
    fn test_reparent_keeps_world() {
        let mut scene = Scene::new();
        let body = scene
            .add_object(
                SceneObject::empty("body")
                    .with_location(1.0, 2.0, 0.0)
                    .with_rotation(Rotation::euler_xyz(0.0, 0.0, FRAC_PI_2)),
            )
            .unwrap();
        let geom = scene
            .add_object(SceneObject::empty("geom").with_location(3.0, 0.0, 0.0))
            .unwrap();

        let before = scene.world_matrix(geom).unwrap();
        scene.reparent_keep_world(geom, body).unwrap();
        let after = scene.world_matrix(geom).unwrap();

        assert!(before.abs_diff_eq(after, 1e-9));
        assert_eq!(scene.object(geom).unwrap().parent, Some(body));
    }
}
