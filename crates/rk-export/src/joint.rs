//! Joint naming, range conversion and actuator pairing

use serde::{Deserialize, Serialize};

use rk_scene::{JointAnnotation, JointAxis, JointKind, SceneObject};
use uuid::Uuid;

use crate::format::round_to;

/// Divisor historically used to turn editor range values into radians
pub const LEGACY_DEGREES_PER_RADIAN: f64 = 57.32;

/// Hinge control ranges are rounded coarser than joint ranges
pub const CTRLRANGE_DECIMALS: i32 = 3;

/// How angular joint ranges are converted to radians
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AngleConversion {
    /// Divide by 57.32, matching previously exported models
    #[default]
    Legacy,
    /// Divide by 180/π
    Exact,
}

impl AngleConversion {
    pub fn divisor(&self) -> f64 {
        match self {
            AngleConversion::Legacy => LEGACY_DEGREES_PER_RADIAN,
            AngleConversion::Exact => 180.0 / std::f64::consts::PI,
        }
    }
}

/// A joint as it will be emitted
#[derive(Debug, Clone, PartialEq)]
pub struct JointSpec {
    pub name: String,
    pub kind: JointKind,
    pub axis: JointAxis,
    /// Lower/upper limit, radians for angular joints
    pub range: [f64; 2],
}

impl JointSpec {
    pub fn from_annotation(
        object: &SceneObject,
        joint: &JointAnnotation,
        conversion: AngleConversion,
    ) -> Self {
        Self {
            name: joint_name(object, joint),
            kind: joint.kind,
            axis: joint.axis,
            range: joint_range(joint, conversion),
        }
    }

    pub fn axis_values(&self) -> [f64; 3] {
        self.axis.unit().to_array()
    }
}

/// Explicit joint name, or `<object>_joint`
pub fn joint_name(object: &SceneObject, joint: &JointAnnotation) -> String {
    match joint.explicit_name() {
        Some(name) => name.to_string(),
        None => format!("{}_joint", object.name),
    }
}

/// Joint range in output units; slide ranges pass through unchanged
///
/// Ball joints only carry an upper bound, so their lower limit is always 0.
pub fn joint_range(joint: &JointAnnotation, conversion: AngleConversion) -> [f64; 2] {
    let divisor = conversion.divisor();
    match joint.kind {
        JointKind::Hinge => [joint.range_min / divisor, joint.range_max / divisor],
        JointKind::Ball => [0.0, joint.range_max / divisor],
        JointKind::Slide => [joint.range_min, joint.range_max],
    }
}

/// Position actuator driving one annotated joint
#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorSpec {
    /// Name of the object that carries the joint
    pub name: String,
    pub object: Uuid,
    pub joint: String,
    pub ctrlrange: [f64; 2],
}

impl ActuatorSpec {
    /// Position actuator for a hinge or slide joint; ball joints have none
    pub fn from_annotation(
        object: &SceneObject,
        joint: &JointAnnotation,
        conversion: AngleConversion,
    ) -> Option<Self> {
        if joint.kind == JointKind::Ball {
            return None;
        }
        let mut ctrlrange = joint_range(joint, conversion);
        if joint.kind == JointKind::Hinge {
            ctrlrange = ctrlrange.map(|v| round_to(v, CTRLRANGE_DECIMALS));
        }
        Some(Self {
            name: object.name.clone(),
            object: object.id,
            joint: joint_name(object, joint),
            ctrlrange,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_values;
    use approx::assert_relative_eq;
    use rk_scene::Annotation;

    fn link_with(joint: JointAnnotation) -> SceneObject {
        SceneObject::empty("arm").with_annotation(Annotation::link().with_joint(joint))
    }

    #[test]
    fn test_legacy_divisor_range() {
        let joint = JointAnnotation::new(JointKind::Hinge, JointAxis::Z).with_range(0.0, 57.32);
        let spec = JointSpec::from_annotation(&link_with(joint.clone()), &joint, AngleConversion::Legacy);

        assert_eq!(format_values(&spec.range), "0 1");
    }

    #[test]
    fn test_exact_divisor_range() {
        let joint = JointAnnotation::new(JointKind::Hinge, JointAxis::X).with_range(-90.0, 180.0);
        let range = joint_range(&joint, AngleConversion::Exact);

        assert_relative_eq!(range[0], -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(range[1], std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_slide_range_unconverted() {
        let joint = JointAnnotation::new(JointKind::Slide, JointAxis::Y).with_range(-0.5, 0.25);
        assert_eq!(joint_range(&joint, AngleConversion::Legacy), [-0.5, 0.25]);
    }

    #[test]
    fn test_joint_names() {
        let unnamed = JointAnnotation::new(JointKind::Hinge, JointAxis::X);
        let placeholder = unnamed.clone().with_name("joint");
        let named = unnamed.clone().with_name("elbow");

        let obj = link_with(unnamed.clone());
        assert_eq!(joint_name(&obj, &unnamed), "arm_joint");
        assert_eq!(joint_name(&obj, &placeholder), "arm_joint");
        assert_eq!(joint_name(&obj, &named), "elbow");
    }

    #[test]
    fn test_actuator_pairs_with_joint() {
        let joint = JointAnnotation::new(JointKind::Hinge, JointAxis::Z)
            .with_name("elbow")
            .with_range(-57.32, 57.32);
        let arm = link_with(joint.clone());
        let actuator = ActuatorSpec::from_annotation(&arm, &joint, AngleConversion::Legacy).unwrap();

        assert_eq!(actuator.name, "arm");
        assert_eq!(actuator.object, arm.id);
        assert_eq!(actuator.joint, "elbow");
        assert_eq!(format_values(&actuator.ctrlrange), "-1 1");
    }

    #[test]
    fn test_ball_range_has_zero_lower_bound() {
        let joint = JointAnnotation::new(JointKind::Ball, JointAxis::X).with_range(-57.32, 114.64);
        assert_eq!(format_values(&joint_range(&joint, AngleConversion::Legacy)), "0 2");
    }

    #[test]
    fn test_ball_joint_has_no_actuator() {
        let joint = JointAnnotation::new(JointKind::Ball, JointAxis::X).with_range(0.0, 57.32);
        assert_eq!(ActuatorSpec::from_annotation(&link_with(joint.clone()), &joint, AngleConversion::Legacy), None);
    }

    #[test]
    fn test_hinge_ctrlrange_uses_three_decimals() {
        let joint = JointAnnotation::new(JointKind::Hinge, JointAxis::Z).with_range(0.0, 100.0);
        let arm = link_with(joint.clone());
        let actuator = ActuatorSpec::from_annotation(&arm, &joint, AngleConversion::Legacy).unwrap();
        let spec = JointSpec::from_annotation(&arm, &joint, AngleConversion::Legacy);

        assert_eq!(format_values(&actuator.ctrlrange), "0 1.745");
        assert_eq!(format_values(&spec.range), "0 1.7446");
    }

    #[test]
    fn test_slide_ctrlrange_keeps_four_decimals() {
        let joint = JointAnnotation::new(JointKind::Slide, JointAxis::Z).with_range(-0.12346, 0.5);
        let actuator =
            ActuatorSpec::from_annotation(&link_with(joint.clone()), &joint, AngleConversion::Legacy).unwrap();

        assert_eq!(format_values(&actuator.ctrlrange), "-0.1235 0.5");
    }
}
