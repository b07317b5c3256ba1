use nalgebra as na;
use std::f64::consts::TAU;

pub type Axis3 = na::Unit<na::Vector3<f64>>;

/// Composes three elemental rotations as an intrinsic (body-fixed) Euler
/// rotation. The first axis is applied first, each following rotation is about
/// the already rotated frame, which gives `R = R(axes[0]) * R(axes[1]) *
/// R(axes[2])`.
pub fn intrinsic_euler2quat(angles: [f64; 3], axes: &[Axis3; 3]) -> na::UnitQuaternion<f64> {
    angles
        .iter()
        .zip(axes.iter())
        .fold(na::UnitQuaternion::identity(), |acc, (&angle, axis)| {
            acc * na::UnitQuaternion::from_axis_angle(axis, angle)
        })
}

/// Rotation vector of a unit quaternion: direction is the axis, norm is the
/// angle in [0, pi]. The identity maps to the zero vector.
pub fn quat2angleaxis(rot: &na::UnitQuaternion<f64>) -> na::Vector3<f64> {
    rot.scaled_axis()
}

pub fn euler2angleaxis(angles: [f64; 3], axes: &[Axis3; 3]) -> na::Vector3<f64> {
    quat2angleaxis(&intrinsic_euler2quat(angles, axes))
}

/// Angles larger than a full turn are almost always degrees fed in as radians
pub fn exceeds_full_turn(angle: f64) -> bool {
    angle.abs() > TAU
}
