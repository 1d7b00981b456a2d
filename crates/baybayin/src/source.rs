//! Upstream source adapters built on the `image` crate.
//!
//! Both sources collapse into a [`Raster`]; nothing here knows about the
//! pipeline stages.

use std::path::Path;

use ::image::{DynamicImage, ImageReader, RgbaImage};
use baybayin_core::{Raster, RasterError, Samples};
use baybayin_preprocess::{normalize_input, PreprocessError};

/// Threshold applied to canvas drawings before preprocessing.
pub const CANVAS_THRESHOLD: u8 = 127;

/// Errors produced while turning files or buffers into rasters.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[from] ::image::ImageError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),
}

/// Where a raster came from; selects the adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// Photo or scan uploaded as an image file.
    #[default]
    Upload,
    /// RGBA drawing surface with a transparent background.
    Canvas,
}

/// Decode an image file and adapt it for `kind`.
pub fn load_raster(path: impl AsRef<Path>, kind: SourceKind) -> Result<Raster, SourceError> {
    let path = path.as_ref();
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    log::debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    match kind {
        SourceKind::Upload => raster_from_dynamic_image(&img),
        SourceKind::Canvas => canvas_raster(&img.to_rgba8()),
    }
}

/// Map a decoded upload onto a [`Raster`] without losing the sample layout.
///
/// 8-bit images are carried as is (gray+alpha widened to RGBA). 16-bit
/// images are scaled down to 8 bits; float images become `F32` samples on
/// the `0..=255` scale the input normalizer expects.
pub fn raster_from_dynamic_image(img: &DynamicImage) -> Result<Raster, SourceError> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let raster = match img {
        DynamicImage::ImageLuma8(buf) => Raster::gray_u8(w, h, buf.as_raw().clone())?,
        DynamicImage::ImageRgb8(buf) => Raster::rgb_u8(w, h, buf.as_raw().clone())?,
        DynamicImage::ImageRgba8(buf) => Raster::rgba_u8(w, h, buf.as_raw().clone())?,
        DynamicImage::ImageLuma16(_) => Raster::gray_u8(w, h, img.to_luma8().into_raw())?,
        DynamicImage::ImageRgb16(_) => Raster::rgb_u8(w, h, img.to_rgb8().into_raw())?,
        DynamicImage::ImageRgb32F(buf) => Raster::new(w, h, 3, scale_unit_floats(buf.as_raw()))?,
        DynamicImage::ImageRgba32F(buf) => Raster::new(w, h, 4, scale_unit_floats(buf.as_raw()))?,
        // LumaA8/LumaA16/Rgba16 and future variants
        other => Raster::rgba_u8(w, h, other.to_rgba8().into_raw())?,
    };
    Ok(raster)
}

fn scale_unit_floats(data: &[f32]) -> Samples {
    Samples::F32(data.iter().map(|&v| v * 255.0).collect())
}

/// Adapt a drawing-canvas buffer.
///
/// Transparent pixels are background: the buffer is composited over white,
/// converted to gray and thresholded at [`CANVAS_THRESHOLD`] with inverted
/// output, so drawn strokes come out as 255 on a 0 background. The polarity
/// stage of the pipeline turns that back into dark ink on white.
pub fn canvas_raster(rgba: &RgbaImage) -> Result<Raster, SourceError> {
    let (w, h) = (rgba.width() as usize, rgba.height() as usize);
    let composited: Vec<u8> = rgba
        .as_raw()
        .chunks_exact(4)
        .flat_map(|px| {
            let a = px[3] as u32;
            let over_white = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
            [over_white(px[0]), over_white(px[1]), over_white(px[2])]
        })
        .collect();

    let gray = normalize_input(&Raster::rgb_u8(w, h, composited)?)?;

    let inverted = gray
        .data
        .iter()
        .map(|&v| if v > CANVAS_THRESHOLD { 0 } else { 255 })
        .collect();
    log::debug!("canvas {}x{} composited and thresholded", w, h);
    Ok(Raster::gray_u8(w, h, inverted)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{GrayImage, ImageBuffer, LumaA, Rgb, Rgba};

    #[test]
    fn gray_upload_keeps_samples() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_raw(2, 1, vec![7, 200]).unwrap());
        let raster = raster_from_dynamic_image(&img).unwrap();
        assert_eq!(raster.channels, 1);
        assert_eq!(raster.samples, Samples::U8(vec![7, 200]));
    }

    #[test]
    fn gray_alpha_upload_is_widened_to_rgba() {
        let buf: ImageBuffer<LumaA<u8>, Vec<u8>> =
            ImageBuffer::from_raw(1, 1, vec![90, 128]).unwrap();
        let raster = raster_from_dynamic_image(&DynamicImage::ImageLumaA8(buf)).unwrap();
        assert_eq!(raster.channels, 4);
        assert_eq!(raster.samples, Samples::U8(vec![90, 90, 90, 128]));
    }

    #[test]
    fn float_upload_is_scaled_to_byte_range() {
        let buf: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::from_raw(1, 1, vec![0.0, 0.5, 1.0]).unwrap();
        let raster = raster_from_dynamic_image(&DynamicImage::ImageRgb32F(buf)).unwrap();
        assert_eq!(raster.samples, Samples::F32(vec![0.0, 127.5, 255.0]));
    }

    #[test]
    fn sixteen_bit_upload_is_scaled_down() {
        let buf: ImageBuffer<::image::Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(2, 1, vec![0, u16::MAX]).unwrap();
        let raster = raster_from_dynamic_image(&DynamicImage::ImageLuma16(buf)).unwrap();
        assert_eq!(raster.samples, Samples::U8(vec![0, 255]));
    }

    #[test]
    fn canvas_transparent_background_and_opaque_strokes() {
        // transparent black, opaque black stroke, opaque near-white fill
        let rgba = RgbaImage::from_fn(3, 1, |x, _| match x {
            0 => Rgba([0, 0, 0, 0]),
            1 => Rgba([0, 0, 0, 255]),
            _ => Rgba([249, 249, 249, 255]),
        });
        let raster = canvas_raster(&rgba).unwrap();
        assert_eq!(raster.channels, 1);
        assert_eq!(raster.samples, Samples::U8(vec![0, 255, 0]));
    }

    #[test]
    fn canvas_half_transparent_stroke_is_thresholded_on_composite() {
        // black at alpha 100 composites to ~155, above the threshold
        let light = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 100]));
        assert_eq!(canvas_raster(&light).unwrap().samples, Samples::U8(vec![0]));
        // black at alpha 200 composites to ~55, below it
        let dark = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 200]));
        assert_eq!(canvas_raster(&dark).unwrap().samples, Samples::U8(vec![255]));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_raster("/nonexistent/char.png", SourceKind::Upload).unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }
}
