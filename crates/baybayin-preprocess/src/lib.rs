//! Normalization pipeline for single-character Baybayin images.
//!
//! Turns an arbitrary photo or canvas drawing into the fixed-size,
//! dark-ink-on-light, stroke-normalized tensor the classifier expects:
//!
//! 1. [`normalize_input`]: any raster to 8-bit grayscale.
//! 2. [`denoise_and_equalize`]: bilateral filter, CLAHE, Gaussian blur.
//! 3. [`binarize_otsu`]: global threshold from the image histogram.
//! 4. [`clean_binary`]: opening (speckle) then closing (gaps).
//! 5. [`normalize_polarity`]: majority colour becomes the white background.
//! 6. [`crop_to_content`]: padded ink bounding box.
//! 7. [`resize_with_padding`]: aspect-preserving fit, centered on a white canvas.
//! 8. [`normalize_stroke_thickness`]: one thinning pass for heavy strokes.
//! 9. [`CharacterTensor`]: `[1, H, W, 1]` floats in `[0, 1]`.
//!
//! Every stage is a pure function of its input and the [`PipelineConfig`].
//!
//! ```
//! use baybayin_core::{GrayImage, Raster};
//! use baybayin_preprocess::{preprocess, PipelineConfig};
//!
//! let cfg = PipelineConfig::default();
//! let raster = Raster::from(GrayImage::filled(120, 80, 255));
//! let tensor = preprocess(&raster, &cfg)?;
//! assert_eq!(tensor.shape(), [1, 64, 64, 1]);
//! # Ok::<(), baybayin_preprocess::PreprocessError>(())
//! ```

mod border;
mod config;
mod crop;
mod denoise;
mod error;
mod morphology;
mod normalize;
mod pipeline;
mod polarity;
mod resize;
mod stroke;
mod tensor;
mod threshold;

pub use config::{
    BilateralParams, ClaheParams, ConfigError, ConfigIoError, GaussianParams, MorphologyParams,
    PipelineConfig,
};
pub use crop::{crop_to_content, ink_bounding_box, BoundingBox};
pub use denoise::{bilateral_filter, clahe, denoise_and_equalize, gaussian_blur, gaussian_kernel};
pub use error::{PreprocessError, Stage};
pub use morphology::{clean_binary, close, dilate, erode, open};
pub use normalize::normalize_input;
pub use pipeline::{preprocess, preprocess_detailed, PreprocessSummary, Preprocessed};
pub use polarity::normalize_polarity;
pub use resize::{fitted_size, resize_area, resize_with_padding, BACKGROUND};
pub use stroke::{ink_fraction, normalize_stroke_thickness};
pub use tensor::CharacterTensor;
pub use threshold::{binarize, binarize_otsu, histogram, otsu_threshold};
