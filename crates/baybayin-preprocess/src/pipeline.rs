//! End-to-end normalization pipeline.

use baybayin_core::{GrayImage, Raster};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::PipelineConfig;
use crate::crop::{crop_to_content, BoundingBox};
use crate::denoise::denoise_and_equalize;
use crate::error::Stage;
use crate::morphology::clean_binary;
use crate::normalize::normalize_input;
use crate::polarity::normalize_polarity;
use crate::resize::resize_with_padding;
use crate::stroke::{ink_fraction, normalize_stroke_thickness};
use crate::tensor::CharacterTensor;
use crate::threshold::binarize_otsu;
use crate::PreprocessError;

/// Decisions taken by the data-dependent stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreprocessSummary {
    pub input_width: usize,
    pub input_height: usize,
    pub otsu_threshold: u8,
    pub inverted: bool,
    /// Padded crop box, `None` for a blank image.
    pub crop: Option<BoundingBox>,
    /// Ink fraction measured before thinning.
    pub ink_fraction: f64,
    pub thinned: bool,
}

/// Pipeline output: the tensor plus the final image and stage decisions.
#[derive(Clone, Debug)]
pub struct Preprocessed {
    pub tensor: CharacterTensor,
    pub image: GrayImage,
    pub summary: PreprocessSummary,
}

/// Normalize a raster into the classifier input tensor.
pub fn preprocess(raster: &Raster, cfg: &PipelineConfig) -> Result<CharacterTensor, PreprocessError> {
    preprocess_detailed(raster, cfg).map(|p| p.tensor)
}

/// Run every stage and keep the intermediate decisions.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(raster, cfg),
        fields(width = raster.width, height = raster.height, channels = raster.channels)
    )
)]
pub fn preprocess_detailed(
    raster: &Raster,
    cfg: &PipelineConfig,
) -> Result<Preprocessed, PreprocessError> {
    cfg.validate()?;
    let [target_w, target_h] = cfg.target_size;

    let gray = normalize_input(raster)?;
    let smoothed = denoise_and_equalize(&gray.view(), cfg);
    let (binary, otsu_threshold) = binarize_otsu(&smoothed.view());
    let cleaned = clean_binary(&binary.view(), &cfg.morphology);
    let (oriented, inverted) = normalize_polarity(&cleaned.view());
    let (cropped, crop) = crop_to_content(&oriented.view(), cfg.crop_padding);
    let canvas = resize_with_padding(&cropped.view(), target_w, target_h);
    let ink_fraction = ink_fraction(&canvas.view());
    let (image, thinned) =
        normalize_stroke_thickness(&canvas.view(), cfg.thickness_threshold, cfg.thinning_kernel);

    let tensor = CharacterTensor::from_image(&image.view())?;
    let expected = [1, target_h, target_w, 1];
    if tensor.shape() != expected {
        return Err(PreprocessError::stage(
            Stage::TensorPack,
            format!("tensor shape {:?} != {:?}", tensor.shape(), expected),
        ));
    }

    log::debug!(
        "preprocessed {}x{} input: t*={} inverted={} crop={:?} thinned={}",
        raster.width,
        raster.height,
        otsu_threshold,
        inverted,
        crop,
        thinned
    );

    Ok(Preprocessed {
        tensor,
        image,
        summary: PreprocessSummary {
            input_width: raster.width,
            input_height: raster.height,
            otsu_threshold,
            inverted,
            crop,
            ink_fraction,
            thinned,
        },
    })
}
