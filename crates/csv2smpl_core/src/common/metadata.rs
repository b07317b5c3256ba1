use enum_map::Enum;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub const NUM_JOINTS: usize = 24;
/// Length of one flattened pose row, joint-major
pub const POSE_DIM: usize = NUM_JOINTS * 3;
pub const SHAPE_SPACE_DIM: usize = 10;
pub const TRANS_DIM: usize = 3;

pub const JOINT_NAMES: [&str; NUM_JOINTS] = [
    "pelvis",
    "left_hip",
    "right_hip",
    "spine1",
    "left_knee",
    "right_knee",
    "spine2",
    "left_ankle",
    "right_ankle",
    "spine3",
    "left_foot",
    "right_foot",
    "neck",
    "left_collar",
    "right_collar",
    "head",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hand",
    "right_hand",
];

/// The SMPL body joints. Declaration order is the layout of the `poses`
/// array and must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enum, EnumIter)]
pub enum SmplJoint {
    Pelvis,
    LeftHip,
    RightHip,
    Spine1,
    LeftKnee,
    RightKnee,
    Spine2,
    LeftAnkle,
    RightAnkle,
    Spine3,
    LeftFoot,
    RightFoot,
    Neck,
    LeftCollar,
    RightCollar,
    Head,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHand,
    RightHand,
}
impl SmplJoint {
    pub fn index(self) -> usize {
        self.into_usize()
    }
    pub fn name(self) -> &'static str {
        JOINT_NAMES[self.index()]
    }
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|joint| joint.name() == name)
    }
}
impl fmt::Display for SmplJoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_order_matches_names() {
        assert_eq!(SmplJoint::iter().count(), NUM_JOINTS);
        for (idx, joint) in SmplJoint::iter().enumerate() {
            assert_eq!(joint.index(), idx);
            assert_eq!(joint.name(), JOINT_NAMES[idx]);
            assert_eq!(SmplJoint::from_name(JOINT_NAMES[idx]), Some(joint));
        }
        assert_eq!(SmplJoint::Pelvis.index(), 0);
        assert_eq!(SmplJoint::RightHand.index(), 23);
        assert_eq!(POSE_DIM, 72);
    }

    #[test]
    fn unknown_name() {
        assert_eq!(SmplJoint::from_name("left_toe"), None);
        assert_eq!(SmplJoint::from_name("Pelvis"), None);
    }
}
