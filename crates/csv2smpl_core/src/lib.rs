//! Conversion of tabular motion capture exports (one CSV row per frame, one
//! column per joint channel) into SMPL motion archives with `poses`, `betas`,
//! `trans` and `gender` entries.
//!
//! The pipeline is:
//! - [`common::mapping::ChannelMapping`] declares which columns drive which
//!   joint,
//! - [`conversions::frame_converter::FrameConverter`] turns one
//!   [`codec::frame_table::Frame`] into a 72 element pose vector,
//! - [`conversions::archive_builder::ArchiveBuilder`] runs the converter over
//!   every frame and assembles a [`codec::motion_archive::MotionArchive`].

pub mod codec;
pub mod common;
pub mod conversions;
pub mod error;

pub use error::{ConversionError, Result};
