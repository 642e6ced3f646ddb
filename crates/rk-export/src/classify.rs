//! Object classification
//!
//! Decides what a scene object becomes in the exported tree from its
//! annotation and host object type.

use rk_scene::{ExportKind, Primitive, SceneObject};

use crate::error::ExportError;

/// Geometry role of a classified object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeomSpec {
    pub primitive: Primitive,
    /// Rendered geometry that carries a material
    pub visual: bool,
    /// Takes part in contacts (collision default class)
    pub collision: bool,
}

/// What an object becomes in the exported tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// A body, carrying its annotated joint if any
    Body,
    Geom(GeomSpec),
    Site,
    Light,
    Camera,
    /// Not exported; its children are walked as if attached to its parent
    Skip,
}

impl ElementKind {
    pub fn is_body(&self) -> bool {
        matches!(self, ElementKind::Body)
    }

    /// Elements emitted in the world frame rather than inside a body
    pub fn is_world_level(&self) -> bool {
        matches!(self, ElementKind::Light | ElementKind::Camera)
    }
}

/// Classify an object
///
/// Geometry without a primitive is an annotation error rather than a
/// silently skipped object.
pub fn classify(object: &SceneObject) -> Result<ElementKind, ExportError> {
    let annotation = &object.annotation;
    let kind = match annotation.kind {
        ExportKind::Link => ElementKind::Body,
        ExportKind::Geom => ElementKind::Geom(GeomSpec {
            primitive: require_primitive(object)?,
            visual: true,
            collision: annotation.is_collision,
        }),
        ExportKind::Collision => ElementKind::Geom(GeomSpec {
            primitive: require_primitive(object)?,
            visual: false,
            collision: true,
        }),
        ExportKind::Site => ElementKind::Site,
        ExportKind::Light => ElementKind::Light,
        ExportKind::None if annotation.is_collision => ElementKind::Geom(GeomSpec {
            primitive: require_primitive(object)?,
            visual: false,
            collision: true,
        }),
        ExportKind::None if object.light_data().is_some() => ElementKind::Light,
        ExportKind::None if object.is_camera() => ElementKind::Camera,
        ExportKind::None => ElementKind::Skip,
    };
    Ok(kind)
}

/// Whether the object's geometry is exported as a mesh asset
pub fn exports_mesh(object: &SceneObject) -> bool {
    matches!(
        classify(object),
        Ok(ElementKind::Geom(GeomSpec {
            primitive: Primitive::Mesh,
            ..
        }))
    )
}

fn require_primitive(object: &SceneObject) -> Result<Primitive, ExportError> {
    object
        .annotation
        .primitive
        .ok_or_else(|| ExportError::MissingAnnotation {
            object: object.name.clone(),
            field: "primitive",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rk_scene::{Annotation, LightData, ObjectType};

    #[test]
    fn test_link_is_body() {
        let obj = SceneObject::empty("base").with_annotation(Annotation::link());
        assert_eq!(classify(&obj).unwrap(), ElementKind::Body);
    }

    #[test]
    fn test_geom_roles() {
        let visual = SceneObject::new("box1", ObjectType::Mesh)
            .with_annotation(Annotation::geom(Primitive::Box));
        let both = SceneObject::new("box2", ObjectType::Mesh)
            .with_annotation(Annotation::geom(Primitive::Box).with_collision_flag());
        let collision = SceneObject::new("hull", ObjectType::Mesh)
            .with_annotation(Annotation::collision(Primitive::Mesh));

        let ElementKind::Geom(spec) = classify(&visual).unwrap() else {
            panic!("expected geom");
        };
        assert!(spec.visual && !spec.collision);

        let ElementKind::Geom(spec) = classify(&both).unwrap() else {
            panic!("expected geom");
        };
        assert!(spec.visual && spec.collision);

        let ElementKind::Geom(spec) = classify(&collision).unwrap() else {
            panic!("expected geom");
        };
        assert!(!spec.visual && spec.collision);
        assert!(exports_mesh(&collision));
    }

    #[test]
    fn test_geom_without_primitive_is_error() {
        let mut annotation = Annotation::geom(Primitive::Box);
        annotation.primitive = None;
        let obj = SceneObject::new("broken", ObjectType::Mesh).with_annotation(annotation);

        let err = classify(&obj).unwrap_err();
        assert!(matches!(err, ExportError::MissingAnnotation { field: "primitive", .. }));
    }

    #[test]
    fn test_unannotated_objects() {
        let empty = SceneObject::empty("group");
        let lamp = SceneObject::new("lamp", ObjectType::Light(LightData::default()));
        let camera = SceneObject::new("cam", ObjectType::Camera);

        assert_eq!(classify(&empty).unwrap(), ElementKind::Skip);
        assert_eq!(classify(&lamp).unwrap(), ElementKind::Light);
        assert_eq!(classify(&camera).unwrap(), ElementKind::Camera);
    }
}
