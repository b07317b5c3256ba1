use crate::error::{ConversionError, Result};
use csv2smpl_utils::numerical::Axis3;
use nalgebra as na;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Gender label stored in the archive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gender {
    #[default]
    Neutral,
    Male,
    Female,
}

/// Axis application order of an intrinsic Euler rotation. `Xyz` rotates about
/// X first, then about the rotated Y, then about the twice rotated Z, so the
/// matrix is `Rx * Ry * Rz`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum EulerOrder {
    #[default]
    #[strum(to_string = "XYZ")]
    Xyz,
    #[strum(to_string = "XZY")]
    Xzy,
    #[strum(to_string = "YXZ")]
    Yxz,
    #[strum(to_string = "YZX")]
    Yzx,
    #[strum(to_string = "ZXY")]
    Zxy,
    #[strum(to_string = "ZYX")]
    Zyx,
}
impl EulerOrder {
    pub fn axes(self) -> [Axis3; 3] {
        let (x, y, z) = (na::Vector3::x_axis(), na::Vector3::y_axis(), na::Vector3::z_axis());
        match self {
            Self::Xyz => [x, y, z],
            Self::Xzy => [x, z, y],
            Self::Yxz => [y, x, z],
            Self::Yzx => [y, z, x],
            Self::Zxy => [z, x, y],
            Self::Zyx => [z, y, x],
        }
    }
}
/// Only upper case is accepted, lower case conventionally means extrinsic
/// rotations which this converter does not do.
impl FromStr for EulerOrder {
    type Err = ConversionError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "XYZ" => Ok(Self::Xyz),
            "XZY" => Ok(Self::Xzy),
            "YXZ" => Ok(Self::Yxz),
            "YZX" => Ok(Self::Yzx),
            "ZXY" => Ok(Self::Zxy),
            "ZYX" => Ok(Self::Zyx),
            other => Err(ConversionError::InvalidEulerOrder(other.to_string())),
        }
    }
}
