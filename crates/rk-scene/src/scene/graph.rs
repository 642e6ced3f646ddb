//! Graph operations for Scene (add, rename, parent, traverse, validate)

use uuid::Uuid;

use super::Scene;
use crate::error::SceneError;
use crate::object::SceneObject;

impl Scene {
    /// Add an object; its `parent`, if set, must already be in the scene
    pub fn add_object(&mut self, object: SceneObject) -> Result<Uuid, SceneError> {
        if self.name_index.contains_key(&object.name) {
            return Err(SceneError::DuplicateName(object.name));
        }
        if let Some(parent) = object.parent
            && !self.index.contains_key(&parent)
        {
            return Err(SceneError::MissingParent { child: object.name });
        }

        let id = object.id;
        self.name_index.insert(object.name.clone(), id);
        self.index.insert(id, self.objects.len());
        self.objects.push(object);
        Ok(id)
    }

    /// Add an object parented under `parent`
    pub fn add_child(
        &mut self,
        parent: Uuid,
        mut object: SceneObject,
    ) -> Result<Uuid, SceneError> {
        if !self.index.contains_key(&parent) {
            return Err(SceneError::ObjectNotFound(parent));
        }
        object.parent = Some(parent);
        self.add_object(object)
    }

    /// Rename an object, keeping the name index consistent
    pub fn rename(&mut self, id: Uuid, name: impl Into<String>) -> Result<(), SceneError> {
        let name = name.into();
        if self.name_index.get(&name).is_some_and(|other| *other != id) {
            return Err(SceneError::DuplicateName(name));
        }
        let object = self.object_mut(id).ok_or(SceneError::ObjectNotFound(id))?;
        let old = std::mem::replace(&mut object.name, name.clone());
        self.name_index.remove(&old);
        self.name_index.insert(name, id);
        Ok(())
    }

    /// Set or clear an object's parent (parent inverse reset to identity)
    pub fn set_parent(&mut self, child: Uuid, parent: Option<Uuid>) -> Result<(), SceneError> {
        if let Some(parent_id) = parent {
            self.check_can_parent(child, parent_id)?;
        }
        let object = self.object_mut(child).ok_or(SceneError::ObjectNotFound(child))?;
        object.parent = parent;
        object.parent_inverse = glam::DMat4::IDENTITY;
        Ok(())
    }

    /// Parent `child` under `parent` while keeping its world transform
    pub fn reparent_keep_world(&mut self, child: Uuid, parent: Uuid) -> Result<(), SceneError> {
        self.check_can_parent(child, parent)?;

        let child_world = self.world_matrix(child)?;
        let parent_world = self.world_matrix(parent)?;
        let object = self.object_mut(child).ok_or(SceneError::ObjectNotFound(child))?;
        let local = object.transform.to_mat4();

        object.parent = Some(parent);
        object.parent_inverse = parent_world.inverse() * child_world * local.inverse();
        Ok(())
    }

    fn check_can_parent(&self, child: Uuid, parent: Uuid) -> Result<(), SceneError> {
        let child_obj = self.object(child).ok_or(SceneError::ObjectNotFound(child))?;
        let parent_obj = self.object(parent).ok_or(SceneError::ObjectNotFound(parent))?;
        if self.would_create_cycle(parent, child) {
            return Err(SceneError::WouldCreateCycle {
                child: child_obj.name.clone(),
                parent: parent_obj.name.clone(),
            });
        }
        Ok(())
    }

    /// Check if parenting child under parent would create a cycle
    pub(crate) fn would_create_cycle(&self, parent: Uuid, child: Uuid) -> bool {
        let mut current = Some(parent);
        let mut steps = 0;
        while let Some(id) = current {
            if id == child || steps > self.objects.len() {
                return true;
            }
            current = self.object(id).and_then(|o| o.parent);
            steps += 1;
        }
        false
    }

    /// Direct children of an object, in scene order
    pub fn children(&self, id: Uuid) -> Vec<&SceneObject> {
        self.objects
            .iter()
            .filter(|o| o.parent == Some(id))
            .collect()
    }

    /// Unparented objects, in scene order
    pub fn roots(&self) -> Vec<&SceneObject> {
        self.objects.iter().filter(|o| o.parent.is_none()).collect()
    }

    /// Check that every parent exists and the parent relation is a forest
    pub fn validate(&self) -> Result<(), SceneError> {
        for object in &self.objects {
            let mut current = object;
            let mut steps = 0;
            while let Some(parent_id) = current.parent {
                current = self.object(parent_id).ok_or_else(|| SceneError::MissingParent {
                    child: current.name.clone(),
                })?;
                steps += 1;
                if steps > self.objects.len() {
                    return Err(SceneError::CyclicParentGraph(object.name.clone()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (Scene, Uuid, Uuid, Uuid) {
        let mut scene = Scene::new();
        let a = scene.add_object(SceneObject::empty("a")).unwrap();
        let b = scene.add_child(a, SceneObject::empty("b")).unwrap();
        let c = scene.add_child(b, SceneObject::empty("c")).unwrap();
        (scene, a, b, c)
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::empty("base")).unwrap();
        let result = scene.add_object(SceneObject::empty("base"));
        assert!(matches!(result, Err(SceneError::DuplicateName(name)) if name == "base"));
    }

    #[test]
    fn test_children_keep_scene_order() {
        let mut scene = Scene::new();
        let root = scene.add_object(SceneObject::empty("root")).unwrap();
        scene.add_child(root, SceneObject::empty("z")).unwrap();
        scene.add_object(SceneObject::empty("other")).unwrap();
        scene.add_child(root, SceneObject::empty("a")).unwrap();

        let names: Vec<&str> = scene.children(root).iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a"]);

        let roots: Vec<&str> = scene.roots().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(roots, vec!["root", "other"]);
    }

    #[test]
    fn test_set_parent_rejects_cycle() {
        let (mut scene, a, _, c) = chain();
        let result = scene.set_parent(a, Some(c));
        assert!(matches!(result, Err(SceneError::WouldCreateCycle { .. })));
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_validate_detects_cycle() {
        let (mut scene, a, _, c) = chain();
        // Bypass the checked API the way a misbehaving host could
        scene.object_mut(a).unwrap().parent = Some(c);
        assert!(matches!(
            scene.validate(),
            Err(SceneError::CyclicParentGraph(_))
        ));
    }

    #[test]
    fn test_rename_updates_index() {
        let (mut scene, a, b, _) = chain();
        scene.rename(a, "base").unwrap();
        assert_eq!(scene.id_of("base"), Some(a));
        assert!(scene.object_by_name("a").is_none());
        assert!(matches!(
            scene.rename(b, "base"),
            Err(SceneError::DuplicateName(_))
        ));
    }
}
