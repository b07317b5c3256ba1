use crate::error::{ConversionError, Result};
use csv2smpl_utils::io::FileLoader;
use log::{debug, info, warn};
use std::{
    collections::{HashMap, HashSet},
    io::Read,
    path::Path,
};

/// One input record. Cells that could not be parsed as a number are absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub values: HashMap<String, f64>,
}
impl Frame {
    pub fn new(index: usize, values: HashMap<String, f64>) -> Self {
        Self { index, values }
    }

    pub fn from_pairs<'a>(index: usize, pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let values = pairs.into_iter().map(|(name, value)| (name.to_string(), value)).collect();
        Self { index, values }
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// Value of a column the caller already knows exists in the dataset
    pub fn value(&self, column: &str) -> Result<f64> {
        self.get(column).ok_or_else(|| ConversionError::invalid_value(column, self.index))
    }
}

/// The full input: header columns in file order plus one [`Frame`] per data
/// row, in time order.
#[derive(Clone, Debug, Default)]
pub struct FrameTable {
    columns: Vec<String>,
    column_set: HashSet<String>,
    frames: Vec<Frame>,
}
impl FrameTable {
    pub fn new(columns: Vec<String>, frames: Vec<Frame>) -> Self {
        let column_set = columns.iter().cloned().collect();
        Self { columns, column_set, frames }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConversionError::InputNotFound(path.to_path_buf()));
        }
        info!("reading frames from {}", path.display());
        Self::from_reader(FileLoader::open(path)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        // a repeated header name reads from its leftmost column
        let mut seen = HashSet::new();
        let first_occurrence: Vec<bool> = columns.iter().map(|column| seen.insert(column.as_str())).collect();
        for (column, _) in columns.iter().zip(&first_occurrence).filter(|(_, first)| !**first) {
            warn!("duplicate column `{column}`, only the leftmost one is read");
        }

        let mut frames = Vec::new();
        for (index, record) in rdr.records().enumerate() {
            let record = record?;
            let values = columns
                .iter()
                .zip(record.iter())
                .zip(&first_occurrence)
                .filter(|(_, first)| **first)
                .filter_map(|((column, cell), _)| cell.parse::<f64>().ok().map(|value| (column.clone(), value)))
                .collect();
            frames.push(Frame::new(index, values));
        }
        debug!("read {} columns and {} frames", columns.len(), frames.len());
        Ok(Self::new(columns, frames))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_set(&self) -> &HashSet<String> {
        &self.column_set
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn nr_frames(&self) -> usize {
        self.frames.len()
    }
}
