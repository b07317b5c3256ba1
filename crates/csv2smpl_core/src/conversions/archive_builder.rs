use super::frame_converter::FrameConverter;
use crate::{
    codec::{
        frame_table::{Frame, FrameTable},
        motion_archive::MotionArchive,
    },
    common::{
        config::ConversionConfig,
        mapping::is_absent,
        metadata::{POSE_DIM, TRANS_DIM},
    },
    error::Result,
};
use log::{debug, info, warn};
use ndarray as nd;
use std::collections::HashSet;

const PROGRESS_EVERY: usize = 1000;

/// Runs the [`FrameConverter`] over a whole recording and assembles the
/// [`MotionArchive`].
pub struct ArchiveBuilder<'a> {
    config: &'a ConversionConfig,
}
impl<'a> ArchiveBuilder<'a> {
    pub fn new(config: &'a ConversionConfig) -> Self {
        Self { config }
    }

    pub fn build_from_table(&self, table: &FrameTable) -> Result<MotionArchive> {
        self.build_archive(table.frames(), table.column_set())
    }

    /// Frame `i` fills row `i` of `poses` and `trans`. The mapping is checked
    /// against `available_columns` before the first frame, and any failure
    /// returns without an archive.
    pub fn build_archive(&self, frames: &[Frame], available_columns: &HashSet<String>) -> Result<MotionArchive> {
        self.config.mapping.validate(available_columns)?;
        let trans_columns = self.translation_columns(available_columns);

        let nr_frames = frames.len();
        let converter = FrameConverter::new(self.config);
        let mut poses = nd::Array2::<f32>::zeros((nr_frames, POSE_DIM));
        let mut trans = nd::Array2::<f32>::zeros((nr_frames, TRANS_DIM));
        for (idx_frame, frame) in frames.iter().enumerate() {
            let pose = converter.convert_frame(frame, available_columns)?;
            poses.row_mut(idx_frame).assign(&pose);

            if let Some(trans_columns) = &trans_columns {
                for (idx_axis, column) in trans_columns.iter().enumerate() {
                    if let Some(column) = column {
                        trans[(idx_frame, idx_axis)] = frame.value(column)? as f32;
                    }
                }
            }

            if (idx_frame + 1) % PROGRESS_EVERY == 0 {
                debug!("converted {}/{nr_frames} frames", idx_frame + 1);
            }
        }
        info!("converted {nr_frames} frames");

        Ok(MotionArchive {
            poses,
            betas: self.config.betas.betas.clone(),
            trans,
            gender: self.config.gender,
            frame_rate: self.config.frame_rate,
        })
    }

    /// Translation is read only when every declared column exists, otherwise
    /// the whole recording gets zero translation.
    fn translation_columns(&self, available_columns: &HashSet<String>) -> Option<[Option<&'a str>; 3]> {
        let config: &'a ConversionConfig = self.config;
        let declared = &config.mapping.trans;
        if is_absent(declared) {
            return None;
        }
        let missing: Vec<&str> = declared
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|column| !available_columns.contains(*column))
            .collect();
        if !missing.is_empty() {
            warn!("translation columns {missing:?} not in the input, translation is set to zero");
            return None;
        }
        Some([declared[0].as_deref(), declared[1].as_deref(), declared[2].as_deref()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::{
            betas::Betas,
            mapping::{channels, repeated, ChannelMapping, EulerOrders},
            metadata::SmplJoint,
            types::Gender,
        },
        error::ConversionError,
    };

    fn config() -> ConversionConfig {
        let mapping = ChannelMapping::neutral()
            .with_translation(channels("tx", "ty", "tz"))
            .with_joint(SmplJoint::Pelvis, channels("tilt", "list", "rot"))
            .with_joint(SmplJoint::LeftKnee, repeated("knee"));
        ConversionConfig::new(mapping, EulerOrders::default())
    }

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn frame(index: usize, k: f64) -> Frame {
        Frame::from_pairs(
            index,
            [("tx", k), ("ty", 2.0 * k), ("tz", -k), ("tilt", 0.1 * k), ("list", 0.0), ("rot", 0.0), ("knee", 0.2 * k)],
        )
    }

    const ALL: [&str; 7] = ["tx", "ty", "tz", "tilt", "list", "rot", "knee"];

    #[test]
    fn shapes_follow_frame_count() {
        let config = config();
        let frames: Vec<Frame> = (0..5).map(|i| frame(i, i as f64)).collect();
        let archive = ArchiveBuilder::new(&config).build_archive(&frames, &set(&ALL)).unwrap();
        assert_eq!(archive.poses.dim(), (5, 72));
        assert_eq!(archive.trans.dim(), (5, 3));
        assert_eq!(archive.betas.len(), 10);
        assert_eq!(archive.gender, Gender::Neutral);
        assert_eq!(archive.trans.row(3).to_vec(), vec![3.0, 6.0, -3.0]);
    }

    #[test]
    fn zero_frames() {
        let config = config();
        let archive = ArchiveBuilder::new(&config).build_archive(&[], &set(&ALL)).unwrap();
        assert_eq!(archive.poses.dim(), (0, 72));
        assert_eq!(archive.trans.dim(), (0, 3));
        assert_eq!(archive.betas.len(), 10);
    }

    #[test]
    fn missing_column_aborts_before_any_frame() {
        let config = config();
        let columns = set(&["tx", "ty", "tz", "tilt", "list", "rot"]);
        match ArchiveBuilder::new(&config).build_archive(&[], &columns) {
            Err(ConversionError::MissingColumn { column }) => assert_eq!(column, "knee"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn partial_translation_is_zero() {
        let config = config();
        let frames: Vec<Frame> = (0..3).map(|i| frame(i, 1.0 + i as f64)).collect();
        let columns = set(&["tx", "tz", "tilt", "list", "rot", "knee"]);
        let archive = ArchiveBuilder::new(&config).build_archive(&frames, &columns).unwrap();
        assert!(archive.trans.iter().all(|v| *v == 0.0));
        assert!(archive.poses.iter().any(|v| *v != 0.0));
    }

    #[test]
    fn absent_translation_is_zero() {
        let mut config = config();
        config.mapping = config.mapping.with_translation(Default::default());
        let frames = vec![frame(0, 1.0)];
        let archive = ArchiveBuilder::new(&config).build_archive(&frames, &set(&ALL)).unwrap();
        assert!(archive.trans.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn rows_follow_input_order() {
        let config = config();
        let frames: Vec<Frame> = (0..4).map(|i| frame(i, 0.5 * i as f64)).collect();
        let reversed: Vec<Frame> = frames.iter().rev().cloned().collect();
        let builder = ArchiveBuilder::new(&config);
        let forward = builder.build_archive(&frames, &set(&ALL)).unwrap();
        let backward = builder.build_archive(&reversed, &set(&ALL)).unwrap();
        for i in 0..4 {
            assert_eq!(forward.poses.row(i), backward.poses.row(3 - i));
            assert_eq!(forward.trans.row(i), backward.trans.row(3 - i));
        }
    }

    #[test]
    fn neutral_joints_stay_zero_in_every_frame() {
        let config = config();
        let frames: Vec<Frame> = (0..6).map(|i| frame(i, 1.0 + i as f64)).collect();
        let archive = ArchiveBuilder::new(&config).build_archive(&frames, &set(&ALL)).unwrap();
        let head = SmplJoint::Head.index() * 3;
        for row in archive.poses.rows() {
            assert_eq!(row.slice(nd::s![head..head + 3]).to_vec(), vec![0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn attaches_config_betas_gender_and_rate() {
        let config = config()
            .with_betas(Betas::new(nd::Array1::from_elem(10, 0.5)))
            .with_gender(Gender::Female)
            .with_frame_rate(100.0);
        let archive = ArchiveBuilder::new(&config).build_archive(&[frame(0, 1.0)], &set(&ALL)).unwrap();
        assert!(archive.betas.iter().all(|b| *b == 0.5));
        assert_eq!(archive.gender, Gender::Female);
        assert_eq!(archive.frame_rate, Some(100.0));
    }

    #[test]
    fn bad_cell_aborts_the_build() {
        let config = config();
        let mut frames: Vec<Frame> = (0..3).map(|i| frame(i, 1.0)).collect();
        frames[1].values.remove("tilt");
        match ArchiveBuilder::new(&config).build_archive(&frames, &set(&ALL)) {
            Err(ConversionError::InvalidValue { column, frame }) => {
                assert_eq!(column, "tilt");
                assert_eq!(frame, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
