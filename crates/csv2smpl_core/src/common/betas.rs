use super::metadata::SHAPE_SPACE_DIM;
use crate::error::Result;
use csv2smpl_utils::io::FileLoader;
use log::{info, warn};
use ndarray as nd;
use ndarray::prelude::*;
use ndarray_npy::NpzReader;
use std::{
    io::{Read, Seek},
    path::Path,
};

/// Smpl Betas or Shape Parameters
#[derive(Clone, Debug, PartialEq)]
pub struct Betas {
    pub betas: nd::Array1<f32>,
}
impl Default for Betas {
    fn default() -> Self {
        Self::new_empty(SHAPE_SPACE_DIM)
    }
}

impl Betas {
    pub fn new(betas: nd::Array1<f32>) -> Self {
        Self { betas }
    }

    pub fn new_empty(num_betas: usize) -> Self {
        let betas = ndarray::Array1::<f32>::zeros(num_betas);
        Self { betas }
    }

    pub fn len(&self) -> usize {
        self.betas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.betas.is_empty()
    }

    /// Truncates or zero pads to exactly `num_betas` entries
    #[must_use]
    pub fn resized(&self, num_betas: usize) -> Self {
        let mut betas = nd::Array1::<f32>::zeros(num_betas);
        let kept = num_betas.min(self.betas.len());
        betas.slice_mut(s![0..kept]).assign(&self.betas.slice(s![0..kept]));
        Self { betas }
    }

    /// Reads the `betas` entry, stored either as f64 (the AMASS convention) or
    /// as f32.
    fn new_from_npz_reader<R: Read + Seek>(npz: &mut NpzReader<R>, num_betas: usize) -> Result<Self> {
        let betas = match npz.by_name::<nd::OwnedRepr<f64>, nd::Ix1>("betas") {
            Ok(betas) => betas.mapv(|x| x as f32),
            Err(_) => npz.by_name::<nd::OwnedRepr<f32>, nd::Ix1>("betas")?,
        };
        if betas.len() != num_betas {
            warn!("npz holds {} betas, resizing to {num_betas}", betas.len());
        }
        Ok(Self::new(betas).resized(num_betas))
    }

    pub fn new_from_npz(npz_path: &Path, num_betas: usize) -> Result<Self> {
        info!("loading betas from {}", npz_path.display());
        let mut npz = NpzReader::new(FileLoader::open(npz_path)?)?;
        Self::new_from_npz_reader(&mut npz, num_betas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_npy::NpzWriter;
    use std::fs::File;

    #[test]
    fn default_is_ten_zeros() {
        let betas = Betas::default();
        assert_eq!(betas.len(), 10);
        assert!(betas.betas.iter().all(|b| *b == 0.0));
    }

    #[test]
    fn resize_truncates_and_pads() {
        let betas = Betas::new(array![1.0, 2.0, 3.0]);
        assert_eq!(betas.resized(2).betas, array![1.0, 2.0]);
        assert_eq!(betas.resized(5).betas, array![1.0, 2.0, 3.0, 0.0, 0.0]);
        assert!(betas.resized(0).is_empty());
    }

    #[test]
    fn loads_f64_betas_from_npz() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fit.npz");
        let mut npz = NpzWriter::new(File::create(&path).unwrap());
        let stored: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.5, 16);
        npz.add_array("betas", &stored).unwrap();
        npz.finish().unwrap();

        let betas = Betas::new_from_npz(&path, 10).unwrap();
        assert_eq!(betas.len(), 10);
        assert!((betas.betas[9] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn loads_f32_betas_from_npz() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fit32.npz");
        let mut npz = NpzWriter::new(File::create(&path).unwrap());
        npz.add_array("betas", &array![0.5f32, -0.5]).unwrap();
        npz.finish().unwrap();

        let betas = Betas::new_from_npz(&path, 10).unwrap();
        assert_eq!(betas.betas.slice(s![0..3]), array![0.5f32, -0.5, 0.0]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Betas::new_from_npz(&dir.path().join("nope.npz"), 10).is_err());
    }
}
