//! Baybayin character recognition.
//!
//! This facade re-exports the workspace crates and adds what an application
//! needs around them:
//! - `baybayin::core`: image containers, [`Raster`] and the process logger.
//! - `baybayin::preprocess`: the normalization pipeline and its configuration.
//! - `baybayin::classifier`: labels, the classifier contract, ranking and
//!   the [`Recognizer`] service.
//! - `baybayin::source` (feature `image`): uploaded-file and drawing-canvas
//!   adapters producing a [`Raster`].
//! - `baybayin::io`: JSON recognition reports.
//!
//! ## Quickstart
//!
//! ```no_run
//! use std::sync::Arc;
//! use baybayin::classifier::{ModelHandle, Recognizer, DEFAULT_TOP_K};
//! use baybayin::source::{load_raster, SourceKind};
//! use baybayin::PipelineConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # #[cfg(feature = "onnx")]
//! # {
//! let model = Arc::new(ModelHandle::load(|| {
//!     baybayin::classifier::OnnxClassifier::load("models/baybayin.onnx")
//! }));
//! let recognizer = Recognizer::new(PipelineConfig::default(), model)?;
//! let raster = load_raster("ka.png", SourceKind::Upload)?;
//! let result = recognizer.recognize(&raster, DEFAULT_TOP_K)?;
//! for p in &result.top {
//!     println!("{} {:.2}%", p.label, p.confidence_percent());
//! }
//! # }
//! # Ok(())
//! # }
//! ```

pub use baybayin_classifier as classifier;
pub use baybayin_core as core;
pub use baybayin_preprocess as preprocess;

pub use baybayin_classifier::{Prediction, RecognizeError, Recognition, Recognizer};
pub use baybayin_core::{GrayImage, Raster};
pub use baybayin_preprocess::{preprocess, CharacterTensor, PipelineConfig, PreprocessError};

pub mod io;
#[cfg(feature = "image")]
pub mod source;

/// Convert a pipeline image into an `image::GrayImage` for saving or display.
#[cfg(feature = "image")]
pub fn to_image_gray(img: &GrayImage) -> Option<::image::GrayImage> {
    ::image::GrayImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
}
