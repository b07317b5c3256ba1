use crate::{
    common::{
        metadata::{POSE_DIM, SHAPE_SPACE_DIM, TRANS_DIM},
        types::Gender,
    },
    error::Result,
};
use csv2smpl_utils::io::{with_extension_of, FileType};
use log::info;
use ndarray as nd;
use ndarray_npy::{NpzWriter, WritableElement, WriteDataError};
use py_literal::Value as PyValue;
use std::{
    fs::File,
    io::{Cursor, Seek, Write},
    path::{Path, PathBuf},
};

/// Width of the numpy unicode dtype used for `gender`, long enough for
/// "neutral".
const GENDER_CHARS: usize = 7;

/// The assembled motion, laid out the way AMASS style consumers expect:
/// - `poses`: nr_frames x 72, per joint axis-angle, joint-major
/// - `betas`: shape parameters
/// - `trans`: nr_frames x 3 root translation
/// - `gender`: numpy unicode scalar
#[derive(Debug, Clone, PartialEq)]
pub struct MotionArchive {
    pub poses: nd::Array2<f32>,
    pub betas: nd::Array1<f32>,
    pub trans: nd::Array2<f32>,
    pub gender: Gender,
    pub frame_rate: Option<f64>,
}
impl Default for MotionArchive {
    fn default() -> Self {
        Self::new_empty(0)
    }
}

impl MotionArchive {
    pub fn new_empty(nr_frames: usize) -> Self {
        Self {
            poses: nd::Array2::<f32>::zeros((nr_frames, POSE_DIM)),
            betas: nd::Array1::<f32>::zeros(SHAPE_SPACE_DIM),
            trans: nd::Array2::<f32>::zeros((nr_frames, TRANS_DIM)),
            gender: Gender::Neutral,
            frame_rate: None,
        }
    }

    pub fn nr_frames(&self) -> usize {
        self.poses.nrows()
    }

    /// Writes the archive, appending `.npz` when the path lacks it. Returns
    /// the path actually written.
    pub fn to_file(&self, path: &Path, compress: bool) -> Result<PathBuf> {
        let path_with_suffix = with_extension_of(path, FileType::Npz);
        info!("saving motion archive in {}", path_with_suffix.display());

        let file = File::create(&path_with_suffix)?;
        let mut npz = if compress {
            NpzWriter::new_compressed(file)
        } else {
            NpzWriter::new(file)
        };
        self.write_to_npz(&mut npz)?;
        npz.finish()?;
        Ok(path_with_suffix)
    }

    /// Uncompressed npz bytes
    pub fn to_buf(&self) -> Result<Vec<u8>> {
        let mut npz = NpzWriter::new(Cursor::new(Vec::new()));
        self.write_to_npz(&mut npz)?;
        let out = npz.finish()?;
        Ok(out.into_inner())
    }

    pub fn write_to_npz<W: Write + Seek>(&self, npz: &mut NpzWriter<W>) -> Result<()> {
        npz.add_array("poses", &self.poses)?;
        npz.add_array("betas", &self.betas)?;
        npz.add_array("trans", &self.trans)?;
        npz.add_array("gender", &nd::Array0::from_elem((), GenderLabel(self.gender)))?;
        if let Some(frame_rate) = self.frame_rate {
            npz.add_array("mocap_framerate", &nd::Array0::<f64>::from_elem((), frame_rate))?;
        }
        Ok(())
    }

    /// One line report of what was written
    pub fn summary(&self, path: &Path) -> String {
        format!(
            "Saved SMPL .npz to {} (poses shape = {:?}, betas shape = {:?}, trans shape = {:?}, gender = {})",
            path.display(),
            self.poses.shape(),
            self.betas.shape(),
            self.trans.shape(),
            self.gender
        )
    }
}

/// Numpy fixed width unicode scalar (`<U7`), which is what `np.savez` makes
/// of a python string.
#[derive(Clone, Copy, Debug)]
struct GenderLabel(Gender);

impl WritableElement for GenderLabel {
    fn type_descriptor() -> PyValue {
        PyValue::String(format!("<U{GENDER_CHARS}"))
    }

    fn write<W: Write>(&self, mut writer: W) -> std::result::Result<(), WriteDataError> {
        let label = self.0.to_string();
        let padding = std::iter::repeat('\0').take(GENDER_CHARS.saturating_sub(label.chars().count()));
        for c in label.chars().take(GENDER_CHARS).chain(padding) {
            writer.write_all(&u32::from(c).to_le_bytes())?;
        }
        Ok(())
    }

    fn write_slice<W: Write>(slice: &[Self], mut writer: W) -> std::result::Result<(), WriteDataError> {
        for label in slice {
            label.write(&mut writer)?;
        }
        Ok(())
    }
}
