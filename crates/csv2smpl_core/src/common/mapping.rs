use super::{metadata::SmplJoint, types::EulerOrder};
use crate::error::{ConversionError, Result};
use enum_map::EnumMap;
use std::collections::HashSet;

/// The three Euler angle sources of one joint, `None` reads as 0.0. Three
/// `None` entries mean the joint keeps the identity rotation.
pub type ChannelTriple = [Option<String>; 3];

pub fn channels(first: &str, second: &str, third: &str) -> ChannelTriple {
    [Some(first.to_string()), Some(second.to_string()), Some(third.to_string())]
}

/// Single degree of freedom joint: the same column drives all three Euler
/// slots. See [`ChannelMapping::steadyspeed`] for what that implies.
pub fn repeated(column: &str) -> ChannelTriple {
    channels(column, column, column)
}

pub fn is_absent(triple: &ChannelTriple) -> bool {
    triple.iter().all(Option::is_none)
}

/// Which input columns drive which SMPL joint, and which drive the root
/// translation.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelMapping {
    pub joints: EnumMap<SmplJoint, ChannelTriple>,
    pub trans: ChannelTriple,
}
impl Default for ChannelMapping {
    fn default() -> Self {
        Self::steadyspeed()
    }
}
impl ChannelMapping {
    /// Every joint at identity and no translation
    pub fn neutral() -> Self {
        Self {
            joints: EnumMap::default(),
            trans: ChannelTriple::default(),
        }
    }

    /// Mapping for the OpenSim style steady speed table (`pelvis_tx`,
    /// `hip_flexion_r`, `lumbar_extension`, ...). Upper body joints stay
    /// neutral.
    ///
    /// Knees and ankles only have one degree of freedom in the source data.
    /// Their single angle is fed into all three Euler slots, so the result is
    /// the compound rotation `R(a0, theta) * R(a1, theta) * R(a2, theta)` for the
    /// joint's axis order, not a hinge rotation about one axis. Downstream
    /// consumers rely on this encoding, do not replace it with a true hinge
    /// without checking with them.
    ///
    /// The lumbar channels drive all three spine joints.
    pub fn steadyspeed() -> Self {
        Self::neutral()
            .with_translation(channels("pelvis_tx", "pelvis_ty", "pelvis_tz"))
            .with_joint(SmplJoint::Pelvis, channels("pelvis_tilt", "pelvis_list", "pelvis_rotation"))
            .with_joint(SmplJoint::RightHip, channels("hip_flexion_r", "hip_adduction_r", "hip_rotation_r"))
            .with_joint(SmplJoint::LeftHip, channels("hip_flexion_l", "hip_adduction_l", "hip_rotation_l"))
            .with_joint(SmplJoint::RightKnee, repeated("knee_angle_r"))
            .with_joint(SmplJoint::LeftKnee, repeated("knee_angle_l"))
            .with_joint(SmplJoint::RightAnkle, repeated("ankle_angle_r"))
            .with_joint(SmplJoint::LeftAnkle, repeated("ankle_angle_l"))
            .with_joint(SmplJoint::Spine1, channels("lumbar_extension", "lumbar_bending", "lumbar_rotation"))
            .with_joint(SmplJoint::Spine2, channels("lumbar_extension", "lumbar_bending", "lumbar_rotation"))
            .with_joint(SmplJoint::Spine3, channels("lumbar_extension", "lumbar_bending", "lumbar_rotation"))
    }

    #[must_use]
    pub fn with_joint(mut self, joint: SmplJoint, triple: ChannelTriple) -> Self {
        self.joints[joint] = triple;
        self
    }

    #[must_use]
    pub fn with_translation(mut self, triple: ChannelTriple) -> Self {
        self.trans = triple;
        self
    }

    pub fn joint(&self, joint: SmplJoint) -> &ChannelTriple {
        &self.joints[joint]
    }

    /// Distinct joint columns in joint order
    pub fn joint_columns(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.joints
            .values()
            .flatten()
            .flatten()
            .map(String::as_str)
            .filter(|column| seen.insert(*column))
            .collect()
    }

    /// Every distinct column the mapping reads, joints first, translation last
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut columns = self.joint_columns();
        for column in self.trans.iter().flatten().map(String::as_str) {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns
    }

    /// Fails on the first joint column that is not in `columns`. Translation
    /// columns are not checked, a missing translation falls back to zero.
    pub fn validate(&self, columns: &HashSet<String>) -> Result<()> {
        match self.joint_columns().into_iter().find(|column| !columns.contains(*column)) {
            Some(column) => Err(ConversionError::missing_column(column)),
            None => Ok(()),
        }
    }
}

/// Per joint Euler axis order, with a shared default
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EulerOrders {
    pub default_order: EulerOrder,
    pub overrides: EnumMap<SmplJoint, Option<EulerOrder>>,
}
impl EulerOrders {
    pub fn new(default_order: EulerOrder) -> Self {
        Self {
            default_order,
            overrides: EnumMap::default(),
        }
    }

    #[must_use]
    pub fn with_override(mut self, joint: SmplJoint, order: EulerOrder) -> Self {
        self.overrides[joint] = Some(order);
        self
    }

    pub fn order_for(&self, joint: SmplJoint) -> EulerOrder {
        self.overrides[joint].unwrap_or(self.default_order)
    }

    /// Parses `left_knee=ZXY`
    pub fn parse_override(spec: &str) -> Result<(SmplJoint, EulerOrder)> {
        let (joint, order) = spec
            .split_once('=')
            .ok_or_else(|| ConversionError::InvalidOverride(spec.to_string()))?;
        let joint = joint.trim();
        let joint = SmplJoint::from_name(joint).ok_or_else(|| ConversionError::UnknownJoint(joint.to_string()))?;
        Ok((joint, order.parse()?))
    }
}
