//! MJCF rendering

use rk_scene::{EulerOrder, JointKind, Pose};

use super::{DocumentContext, TargetFormat};
use crate::assets::{AssetRegistry, COLLISION_MATERIAL};
use crate::attributes::AttributeSet;
use crate::classify::{ElementKind, classify};
use crate::error::ExportError;
use crate::format::{format_scalar, format_values, format_vector};
use crate::joint::JointSpec;
use crate::tree::{BodyElement, GeomElement, KinematicBody, SiteElement};
use crate::xml::XmlElement;

const SITE_RGBA: &str = "1 0 0 1";
const SITE_GROUP: &str = "3";

/// `(directional, attenuation, diffuse, pos, dir)` of the fallback lights
const DEFAULT_LIGHTS: [(&str, &str, &str, &str, &str); 4] = [
    ("true", ".01 .01 .01", ".7 .7 .65", "2 -2 4", "-.5 .5 -1"),
    ("false", ".15 .15 .15", ".3 .3 .3", "-6 -6 5", "-.5 .5 -1"),
    ("false", ".15 .15 .15", ".3 .3 .3", "-6 -6 5", "-.5 .5 -1"),
    ("false", ".15 .15 .15", ".3 .3 .3", "6 6 5", "-.5 .5 -1"),
];

/// MuJoCo MJCF documents
#[derive(Debug, Clone, Copy, Default)]
pub struct MjcfFormat;

impl TargetFormat for MjcfFormat {
    fn name(&self) -> &'static str {
        "MJCF"
    }

    fn extension(&self) -> &'static str {
        "xml"
    }

    fn build_document(&self, ctx: &DocumentContext<'_>) -> Result<XmlElement, ExportError> {
        let root_name = ctx.root.name.as_str();

        let mut doc = XmlElement::new("mujoco").attr("model", ctx.model_name);
        doc.push(
            XmlElement::new("compiler")
                .attr("inertiafromgeom", "auto")
                .attr("inertiagrouprange", "4 4")
                .attr("angle", "radian"),
        );
        doc.push(XmlElement::new("size").attr("njmax", "1000").attr("nconmax", "500"));
        doc.push(asset_section(ctx.assets));
        doc.push(visual_section());
        doc.push(default_section(root_name));
        doc.push(worldbody(ctx)?);
        doc.push(actuator_section(ctx));
        Ok(doc)
    }
}

fn asset_section(assets: &AssetRegistry) -> XmlElement {
    let mut asset = XmlElement::new("asset");
    for texture in &assets.textures {
        asset.push(
            XmlElement::new("texture")
                .attr("name", &texture.name)
                .attr("type", "2d")
                .attr("file", &texture.file),
        );
    }
    for material in &assets.materials {
        let attrs = AttributeSet::new()
            .set("name", &material.name)
            .set("rgba", format_values(&material.rgba))
            .set_opt("shininess", material.shininess.map(format_scalar))
            .set_opt("texture", material.texture.as_deref());
        asset.push(XmlElement::with_attributes("material", attrs));
    }
    for mesh in &assets.meshes {
        asset.push(XmlElement::new("mesh").attr("name", &mesh.name).attr("file", &mesh.file));
    }
    asset
}

fn visual_section() -> XmlElement {
    XmlElement::new("visual")
        .child(
            XmlElement::new("map")
                .attr("fogstart", "1.5")
                .attr("fogend", "5")
                .attr("force", "0.1")
                .attr("znear", "0.1"),
        )
        .child(
            XmlElement::new("quality")
                .attr("shadowsize", "16384")
                .attr("offsamples", "24"),
        )
        .child(XmlElement::new("global").attr("offwidth", "800").attr("offheight", "800"))
}

fn default_section(root_name: &str) -> XmlElement {
    let collision = XmlElement::new("default").attr("class", COLLISION_MATERIAL).child(
        XmlElement::new("geom")
            .attr("contype", "1")
            .attr("conaffinity", "1")
            .attr("condim", "4")
            .attr("group", "4")
            .attr("material", COLLISION_MATERIAL),
    );

    let class = XmlElement::new("default")
        .attr("class", root_name)
        .child(XmlElement::new("joint").attr("limited", "true").attr("damping", "1"))
        .child(
            XmlElement::new("geom")
                .attr("contype", "0")
                .attr("conaffinity", "0")
                .attr("group", "1")
                .attr("type", "mesh"),
        )
        .child(XmlElement::new("position").attr("ctrllimited", "true"))
        .child(collision);

    XmlElement::new("default").child(class)
}

fn worldbody(ctx: &DocumentContext<'_>) -> Result<XmlElement, ExportError> {
    let root_name = ctx.root.name.as_str();
    let mut world = XmlElement::new("worldbody");

    let mut lights = Vec::new();
    let mut cameras = Vec::new();
    for object in ctx.scene.objects() {
        match classify(object) {
            Ok(ElementKind::Light) => lights.push(object),
            Ok(ElementKind::Camera) => cameras.push(object),
            _ => {}
        }
    }

    if lights.is_empty() {
        for (directional, attenuation, diffuse, pos, dir) in DEFAULT_LIGHTS {
            world.push(
                XmlElement::new("light")
                    .attr("directional", directional)
                    .attr("attenuation", attenuation)
                    .attr("diffuse", diffuse)
                    .attr("specular", "0.3 0.3 0.3")
                    .attr("pos", pos)
                    .attr("dir", dir),
            );
        }
    }
    for light in lights {
        let color = light.light_data().map(|d| d.color).unwrap_or([1.0, 1.0, 1.0]);
        let position = ctx.scene.world_matrix(light.id)?.w_axis.truncate();
        let attrs = AttributeSet::new()
            .set("name", &light.name)
            .set("mode", "targetbodycom")
            .set("target", root_name)
            .set("directional", "false")
            .set("diffuse", format_values(&color))
            .set("specular", "0.3 0.3 0.3")
            .set_opt("pos", format_vector(&position.to_array()))
            .set("dir", "-1 -1 -1");
        world.push(XmlElement::with_attributes("light", attrs));
    }
    for camera in cameras {
        let position = ctx.scene.world_matrix(camera.id)?.w_axis.truncate();
        let attrs = AttributeSet::new()
            .set("name", &camera.name)
            .set_opt("pos", format_vector(&position.to_array()))
            .set("mode", "targetbodycom")
            .set("target", root_name);
        world.push(XmlElement::with_attributes("camera", attrs));
    }

    world.push(
        XmlElement::new("body")
            .attr("childclass", root_name)
            .child(body_element(ctx.tree)),
    );
    Ok(world)
}

/// `pos`/`euler` attributes, absent when zero
fn pose_attributes(attrs: AttributeSet, pose: &Pose) -> AttributeSet {
    let euler = pose.euler(EulerOrder::Zyx);
    attrs
        .set_opt("pos", format_vector(&pose.position.to_array()))
        .set_opt("euler", format_vector(&euler.to_array()))
}

fn body_element(body: &KinematicBody) -> XmlElement {
    let attrs = pose_attributes(AttributeSet::new().set("name", &body.name), &body.pose);
    let mut element = XmlElement::with_attributes("body", attrs);

    if let Some(joint) = &body.joint {
        element.push(joint_element(joint));
    }
    for child in &body.elements {
        element.push(match child {
            BodyElement::Geom(geom) => geom_element(geom),
            BodyElement::Site(site) => site_element(site),
        });
    }
    for nested in &body.bodies {
        element.push(body_element(nested));
    }
    element
}

fn joint_element(joint: &JointSpec) -> XmlElement {
    let mut attrs = AttributeSet::new().set("name", &joint.name);
    if joint.kind != JointKind::Ball {
        attrs = attrs.set("axis", format_values(&joint.axis_values()));
    }
    attrs = attrs.set("limited", "true");
    match joint.kind {
        JointKind::Hinge => {}
        JointKind::Slide => attrs = attrs.set("type", "slide"),
        JointKind::Ball => attrs = attrs.set("type", "ball"),
    }
    attrs = attrs.set("range", format_values(&joint.range));
    XmlElement::with_attributes("joint", attrs)
}

fn geom_element(geom: &GeomElement) -> XmlElement {
    let mut attrs = AttributeSet::new()
        .set("name", &geom.name)
        .set("type", geom.primitive.as_str())
        .set_opt("mesh", geom.mesh.as_deref());
    if geom.collision {
        attrs = attrs.set("class", COLLISION_MATERIAL);
    }
    attrs = pose_attributes(attrs, &geom.pose)
        .set_opt("size", geom.size_values().and_then(|s| format_vector(&s)))
        .set_opt("material", geom.material.as_deref());
    XmlElement::with_attributes("geom", attrs)
}

fn site_element(site: &SiteElement) -> XmlElement {
    let attrs = AttributeSet::new()
        .set("name", &site.name)
        .set("rgba", SITE_RGBA)
        .set_opt("pos", format_vector(&site.pose.position.to_array()))
        .set("type", "sphere")
        .set("size", format_scalar(site.radius))
        .set("group", SITE_GROUP);
    XmlElement::with_attributes("site", attrs)
}

fn actuator_section(ctx: &DocumentContext<'_>) -> XmlElement {
    let kp = format_scalar(ctx.options.actuator_kp);
    let mut section = XmlElement::new("actuator");
    for actuator in ctx.actuators {
        section.push(
            XmlElement::new("position")
                .attr("name", &actuator.name)
                .attr("kp", &kp)
                .attr("joint", &actuator.joint)
                .attr("ctrlrange", format_values(&actuator.ctrlrange))
                .attr("ctrllimited", "true"),
        );
    }
    section
}
