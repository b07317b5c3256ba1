use crate::{
    codec::frame_table::Frame,
    common::{
        config::ConversionConfig,
        mapping::is_absent,
        metadata::{SmplJoint, POSE_DIM},
    },
    error::{ConversionError, Result},
};
use csv2smpl_utils::numerical::{euler2angleaxis, exceeds_full_turn};
use log::warn;
use nalgebra as na;
use ndarray as nd;
use std::{
    collections::HashSet,
    sync::atomic::{AtomicBool, Ordering},
};
use strum::IntoEnumIterator;

/// Turns one frame of joint channels into a flattened SMPL pose
/// (24 joints x axis-angle).
pub struct FrameConverter<'a> {
    config: &'a ConversionConfig,
    warned_out_of_range: AtomicBool,
}
impl<'a> FrameConverter<'a> {
    pub fn new(config: &'a ConversionConfig) -> Self {
        Self {
            config,
            warned_out_of_range: AtomicBool::new(false),
        }
    }

    /// Joints whose channels are all absent stay at zero. A mapped column not
    /// in `available_columns` fails the whole frame.
    pub fn convert_frame(&self, frame: &Frame, available_columns: &HashSet<String>) -> Result<nd::Array1<f32>> {
        let mut pose = nd::Array1::<f32>::zeros(POSE_DIM);
        for joint in SmplJoint::iter() {
            let angle_axis = self.convert_joint(joint, frame, available_columns)?;
            let offset = joint.index() * 3;
            for (c, value) in angle_axis.iter().enumerate() {
                pose[offset + c] = *value as f32;
            }
        }
        Ok(pose)
    }

    pub fn convert_joint(&self, joint: SmplJoint, frame: &Frame, available_columns: &HashSet<String>) -> Result<na::Vector3<f64>> {
        let triple = self.config.mapping.joint(joint);
        if is_absent(triple) {
            return Ok(na::Vector3::zeros());
        }
        let mut angles = [0.0; 3];
        for (angle, column) in angles.iter_mut().zip(triple.iter()) {
            if let Some(column) = column {
                *angle = self.resolve_angle(column, frame, available_columns)?;
            }
        }
        let order = self.config.euler_orders.order_for(joint);
        Ok(euler2angleaxis(angles, &order.axes()))
    }

    fn resolve_angle(&self, column: &str, frame: &Frame, available_columns: &HashSet<String>) -> Result<f64> {
        if !available_columns.contains(column) {
            return Err(ConversionError::missing_column(column));
        }
        let value = frame.value(column)?;
        if exceeds_full_turn(value) {
            if self.config.reject_out_of_range_angles {
                return Err(ConversionError::AngleOutOfRange {
                    column: column.to_string(),
                    frame: frame.index,
                    value,
                });
            }
            if !self.warned_out_of_range.swap(true, Ordering::Relaxed) {
                warn!(
                    "angle {value} in column `{column}` at frame {} is larger than 2π, angles are expected in radians and are not rescaled",
                    frame.index
                );
            }
        }
        Ok(value)
    }
}
