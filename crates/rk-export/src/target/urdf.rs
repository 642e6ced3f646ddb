//! URDF rendering
//!
//! Bodies become links connected by joints. Primitive scale is read as
//! half-extents, so box sizes and cylinder lengths are doubled. URDF has no
//! sites; they are left out.

use rk_scene::{EulerOrder, JointKind, Pose, Primitive};

use super::{DocumentContext, TargetFormat};
use crate::attributes::AttributeSet;
use crate::error::ExportError;
use crate::format::{format_scalar, format_values, format_vector};
use crate::tree::{GeomElement, KinematicBody};
use crate::xml::XmlElement;

/// URDF robot descriptions
#[derive(Debug, Clone, Copy, Default)]
pub struct UrdfFormat;

impl TargetFormat for UrdfFormat {
    fn name(&self) -> &'static str {
        "URDF"
    }

    fn extension(&self) -> &'static str {
        "urdf"
    }

    fn xml_declaration(&self) -> bool {
        true
    }

    fn build_document(&self, ctx: &DocumentContext<'_>) -> Result<XmlElement, ExportError> {
        let mut robot = XmlElement::new("robot").attr("name", ctx.model_name);

        for name in ctx.materials {
            let Some(material) = ctx.assets.material(name) else {
                continue;
            };
            let mut element = XmlElement::new("material")
                .attr("name", &material.name)
                .child(XmlElement::new("color").attr("rgba", format_values(&material.rgba)));
            if let Some(texture) = material.texture.as_deref().and_then(|t| ctx.assets.texture(t)) {
                element.push(XmlElement::new("texture").attr("filename", &texture.file));
            }
            robot.push(element);
        }

        let mut links = Vec::new();
        let mut joints = Vec::new();
        collect_links(ctx, ctx.tree, &mut links, &mut joints)?;
        robot.children.extend(links);
        robot.children.extend(joints);
        Ok(robot)
    }
}

fn collect_links(
    ctx: &DocumentContext<'_>,
    body: &KinematicBody,
    links: &mut Vec<XmlElement>,
    joints: &mut Vec<XmlElement>,
) -> Result<(), ExportError> {
    let mut link = XmlElement::new("link").attr("name", &body.name);
    for geom in body.geoms() {
        let geometry = geometry_element(ctx, geom)?;
        if geom.visual {
            let mut visual = origin_child(XmlElement::new("visual").attr("name", &geom.name), &geom.pose)
                .child(XmlElement::new("geometry").child(geometry.clone()));
            if let Some(material) = &geom.material {
                visual.push(XmlElement::new("material").attr("name", material));
            }
            link.push(visual);
        }
        if geom.collision {
            link.push(
                origin_child(XmlElement::new("collision").attr("name", &geom.name), &geom.pose)
                    .child(XmlElement::new("geometry").child(geometry)),
            );
        }
    }
    if body.sites().next().is_some() {
        tracing::debug!("Sites on link '{}' have no URDF counterpart", body.name);
    }
    links.push(link);

    for child in &body.bodies {
        joints.push(joint_element(body, child));
        collect_links(ctx, child, links, joints)?;
    }
    Ok(())
}

/// Append an `origin` child unless the pose is the identity
fn origin_child(element: XmlElement, pose: &Pose) -> XmlElement {
    let attrs = AttributeSet::new()
        .set_opt("xyz", format_vector(&pose.position.to_array()))
        .set_opt("rpy", format_vector(&pose.euler(EulerOrder::Xyz).to_array()));
    if attrs.is_empty() {
        element
    } else {
        element.child(XmlElement::with_attributes("origin", attrs))
    }
}

fn geometry_element(ctx: &DocumentContext<'_>, geom: &GeomElement) -> Result<XmlElement, ExportError> {
    let s = geom.scale;
    let element = match geom.primitive {
        Primitive::Box => {
            XmlElement::new("box").attr("size", format_values(&[2.0 * s.x, 2.0 * s.y, 2.0 * s.z]))
        }
        Primitive::Cylinder | Primitive::Capsule => XmlElement::new(geom.primitive.as_str())
            .attr("radius", format_scalar(s.y))
            .attr("length", format_scalar(2.0 * s.z)),
        Primitive::Sphere => XmlElement::new("sphere").attr("radius", format_scalar(s.x)),
        Primitive::Mesh => {
            let mesh = geom.mesh.as_deref().unwrap_or(&geom.name);
            XmlElement::new("mesh").attr("filename", ctx.options.mesh_file(mesh))
        }
        Primitive::Ellipsoid => {
            return Err(ExportError::UnsupportedPrimitive {
                format: "URDF",
                primitive: geom.primitive,
                object: geom.name.clone(),
            });
        }
    };
    Ok(element)
}

fn joint_element(parent: &KinematicBody, child: &KinematicBody) -> XmlElement {
    let (name, kind) = match &child.joint {
        Some(joint) => {
            let kind = match joint.kind {
                JointKind::Hinge => "revolute",
                JointKind::Slide => "prismatic",
                JointKind::Ball => "fixed",
            };
            (joint.name.clone(), kind)
        }
        None => (format!("{}_joint", child.name), "fixed"),
    };

    let mut element = XmlElement::new("joint")
        .attr("name", name)
        .attr("type", kind)
        .child(XmlElement::new("parent").attr("link", &parent.name))
        .child(XmlElement::new("child").attr("link", &child.name));
    element = origin_child(element, &child.pose);

    if let Some(joint) = &child.joint
        && kind != "fixed"
    {
        element.push(XmlElement::new("axis").attr("xyz", format_values(&joint.axis_values())));
        element.push(
            XmlElement::new("limit")
                .attr("lower", format_scalar(joint.range[0]))
                .attr("upper", format_scalar(joint.range[1]))
                .attr("effort", "0")
                .attr("velocity", "1"),
        );
    }
    element
}
