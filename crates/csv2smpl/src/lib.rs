#![deny(missing_docs)]
//! ## Crate Items Overview
//!
//! This section provides quick links to the main items in csv2smpl.
//!
//! ### Modules
//! - [`csv2smpl_core`](crate::csv2smpl_core) - Mapping table, frame conversion and archive assembly.
//! - [`csv2smpl_utils`](crate::csv2smpl_utils) - Rotation math and file helpers.
//!
//! ## Binary
//! `apps/csv2smpl` wraps the pipeline in a command line tool:
//!
//! ```text
//! csv2smpl -i steadyspeed.csv -o motion_smpl.npz --euler-order left_knee=ZXY
//! ```
pub use csv2smpl_core;
pub use csv2smpl_utils;
