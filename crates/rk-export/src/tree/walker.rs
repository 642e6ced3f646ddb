//! Depth-first walk from an export root

use std::collections::HashSet;

use rk_scene::{Primitive, Scene, SceneObject};
use uuid::Uuid;

use super::{BodyElement, GeomElement, KinematicBody, SiteElement};
use crate::assets::{AssetRegistry, COLLISION_MATERIAL};
use crate::classify::{ElementKind, GeomSpec, classify};
use crate::error::ExportError;
use crate::joint::{AngleConversion, JointSpec};

/// Result of walking one root
#[derive(Debug, Clone)]
pub struct WalkOutput {
    pub root: KinematicBody,
    /// Names of joints emitted in this tree
    pub joints: Vec<String>,
    /// Objects carrying those joints, same order
    pub joint_objects: Vec<Uuid>,
    /// Materials referenced by geoms, first-use order
    pub materials: Vec<String>,
    /// Mesh assets referenced by geoms
    pub meshes: Vec<String>,
}

/// Builds the kinematic tree of one root
///
/// Each body emits its geometry and sites before recursing into child
/// bodies. Unannotated objects are transparent: their children are treated
/// as children of the nearest exported ancestor.
pub struct TreeWalker<'a> {
    scene: &'a Scene,
    assets: &'a AssetRegistry,
    conversion: AngleConversion,
    visited: HashSet<Uuid>,
    joints: Vec<String>,
    joint_objects: Vec<Uuid>,
    materials: Vec<String>,
    meshes: Vec<String>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(scene: &'a Scene, assets: &'a AssetRegistry, conversion: AngleConversion) -> Self {
        Self {
            scene,
            assets,
            conversion,
            visited: HashSet::new(),
            joints: Vec::new(),
            joint_objects: Vec::new(),
            materials: Vec::new(),
            meshes: Vec::new(),
        }
    }

    pub fn walk(mut self, root: &'a SceneObject) -> Result<WalkOutput, ExportError> {
        let root = self.visit_body(root, None)?;
        Ok(WalkOutput {
            root,
            joints: self.joints,
            joint_objects: self.joint_objects,
            materials: self.materials,
            meshes: self.meshes,
        })
    }

    fn visit_body(
        &mut self,
        object: &'a SceneObject,
        parent: Option<&'a SceneObject>,
    ) -> Result<KinematicBody, ExportError> {
        if !self.visited.insert(object.id) {
            return Err(ExportError::CyclicParentGraph(object.name.clone()));
        }

        let pose = self.scene.relative_pose(parent, object)?;
        let joint = object
            .annotation
            .joint
            .as_ref()
            .map(|joint| JointSpec::from_annotation(object, joint, self.conversion));
        if let Some(joint) = &joint {
            if self.joints.contains(&joint.name) {
                return Err(ExportError::DuplicateJoint {
                    name: joint.name.clone(),
                    object: object.name.clone(),
                });
            }
            self.joints.push(joint.name.clone());
            self.joint_objects.push(object.id);
        }
        let mut body = KinematicBody::new(&object.name, object.id, pose, joint);

        let children = self.attached_children(object)?;

        let mut site_index = 0;
        for &(child, kind) in &children {
            match kind {
                ElementKind::Geom(spec) => {
                    let geom = self.geom_element(object, child, spec)?;
                    body.elements.push(BodyElement::Geom(geom));
                }
                ElementKind::Site => {
                    let site = SiteElement {
                        name: format!("{}{}", child.name, site_index),
                        pose: self.scene.relative_pose(Some(object), child)?,
                        radius: child.transform.scale.x,
                    };
                    site_index += 1;
                    body.elements.push(BodyElement::Site(site));
                }
                _ => {}
            }
        }

        for &(child, kind) in &children {
            if kind.is_body() {
                let nested = self.visit_body(child, Some(object))?;
                body.bodies.push(nested);
            }
        }

        tracing::debug!(
            "Body '{}': {} elements, {} child bodies",
            body.name,
            body.elements.len(),
            body.bodies.len()
        );
        Ok(body)
    }

    /// Exported children of a body in scene order, looking through skipped objects
    fn attached_children(
        &self,
        object: &'a SceneObject,
    ) -> Result<Vec<(&'a SceneObject, ElementKind)>, ExportError> {
        let mut out = Vec::new();
        let mut stack: Vec<&'a SceneObject> = self.scene.children(object.id);
        stack.reverse();

        let mut steps = 0;
        while let Some(child) = stack.pop() {
            steps += 1;
            if steps > self.scene.len() {
                return Err(ExportError::CyclicParentGraph(child.name.clone()));
            }

            let kind = classify(child)?;
            match kind {
                ElementKind::Skip => {
                    let mut nested = self.scene.children(child.id);
                    nested.reverse();
                    stack.extend(nested);
                }
                kind if kind.is_world_level() => {}
                kind => out.push((child, kind)),
            }
        }
        Ok(out)
    }

    fn geom_element(
        &mut self,
        body: &SceneObject,
        object: &SceneObject,
        spec: GeomSpec,
    ) -> Result<GeomElement, ExportError> {
        let material = if spec.visual {
            match object.primary_material() {
                Some(name) => Some(self.resolve_material(object, name)?),
                None => None,
            }
        } else {
            None
        };

        let mesh = if spec.primitive == Primitive::Mesh {
            if self.assets.mesh(&object.name).is_none() {
                return Err(ExportError::UnresolvedReference {
                    kind: "mesh",
                    name: object.name.clone(),
                    object: object.name.clone(),
                });
            }
            if !self.meshes.contains(&object.name) {
                self.meshes.push(object.name.clone());
            }
            Some(object.name.clone())
        } else {
            None
        };

        Ok(GeomElement {
            name: object.name.clone(),
            primitive: spec.primitive,
            pose: self.scene.relative_pose(Some(body), object)?,
            scale: object.transform.scale,
            visual: spec.visual,
            collision: spec.collision,
            material,
            mesh,
        })
    }

    fn resolve_material(&mut self, object: &SceneObject, name: &str) -> Result<String, ExportError> {
        if name != COLLISION_MATERIAL && self.assets.material(name).is_none() {
            return Err(ExportError::UnresolvedReference {
                kind: "material",
                name: name.to_string(),
                object: object.name.clone(),
            });
        }
        if !self.materials.iter().any(|m| m == name) {
            self.materials.push(name.to_string());
        }
        Ok(name.to_string())
    }
}
