//! Core types shared by the Baybayin recognition crates.
//!
//! This crate is intentionally small. It owns the pixel containers that flow
//! between pipeline stages and the process-wide logger; it knows nothing
//! about the classifier or about image file formats.

mod image;
mod logger;
mod raster;

pub use image::{GrayImage, GrayImageView};
pub use raster::{Raster, RasterError, SampleKind, Samples};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_env, resolve_level, LOG_ENV};
