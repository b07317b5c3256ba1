//! Error types for the conversion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion. None of them are recoverable, a failed run
/// never writes an archive.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The input file does not exist.
    #[error("CSV file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A column referenced by the mapping is not in the input.
    #[error("CSV missing expected column: {column}")]
    MissingColumn {
        /// Exact name the mapping expects.
        column: String,
    },

    /// A mapped column holds a value that is not a number.
    #[error("non-numeric value in column `{column}` at frame {frame}")]
    InvalidValue {
        /// Column name.
        column: String,
        /// Zero based frame (data row) index.
        frame: usize,
    },

    /// An angle larger than a full turn, only raised in strict radians mode.
    #[error("angle {value} in column `{column}` at frame {frame} exceeds 2π, is the input in degrees?")]
    AngleOutOfRange {
        /// Column name.
        column: String,
        /// Zero based frame index.
        frame: usize,
        /// Offending value.
        value: f64,
    },

    /// Unknown Euler order string.
    #[error("invalid euler order `{0}`, expected one of XYZ, XZY, YXZ, YZX, ZXY, ZYX")]
    InvalidEulerOrder(String),

    /// Unknown joint name.
    #[error("unknown joint `{0}`")]
    UnknownJoint(String),

    /// Malformed `joint=ORDER` override.
    #[error("invalid euler order override `{0}`, expected JOINT=ORDER")]
    InvalidOverride(String),

    /// CSV parsing failure.
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure writing the npz archive.
    #[error("failed to write npz: {0}")]
    WriteNpz(#[from] ndarray_npy::WriteNpzError),

    /// Failure reading an npz archive.
    #[error("failed to read npz: {0}")]
    ReadNpz(#[from] ndarray_npy::ReadNpzError),
}

impl ConversionError {
    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn { column: column.into() }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(column: impl Into<String>, frame: usize) -> Self {
        Self::InvalidValue {
            column: column.into(),
            frame,
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;
