//! Input normalizer: any supported raster to 8-bit grayscale.

use baybayin_core::{GrayImage, Raster, Samples};
use std::borrow::Cow;

use crate::PreprocessError;

// ITU-R BT.601 luma weights in Q14 fixed point.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Convert a raster with 1, 3 or 4 channels into a grayscale image.
///
/// Samples are first brought to `u8`: booleans map to `{0, 255}`, wider
/// types are rounded and clipped to `0..=255`. Alpha is discarded; callers
/// that need transparent pixels treated as background composite first
/// (see the canvas adapter in the facade crate).
pub fn normalize_input(raster: &Raster) -> Result<GrayImage, PreprocessError> {
    raster.validate()?;

    let samples = samples_to_u8(&raster.samples);
    let (w, h) = (raster.width, raster.height);
    let data = match raster.channels {
        1 => samples.into_owned(),
        c => samples.chunks_exact(c).map(|px| luma(px[0], px[1], px[2])).collect(),
    };

    log::debug!(
        "normalized {}x{} raster ({} channel(s), {:?} samples) to grayscale",
        w,
        h,
        raster.channels,
        raster.samples.kind()
    );
    Ok(GrayImage {
        width: w,
        height: h,
        data,
    })
}

#[inline]
pub(crate) fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
    ((y + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

fn samples_to_u8(samples: &Samples) -> Cow<'_, [u8]> {
    match samples {
        Samples::U8(v) => Cow::Borrowed(v),
        Samples::U16(v) => Cow::Owned(v.iter().map(|&s| s.min(255) as u8).collect()),
        Samples::F32(v) => Cow::Owned(v.iter().map(|&s| saturate_f32(s)).collect()),
        Samples::Bool(v) => Cow::Owned(v.iter().map(|&s| if s { 255 } else { 0 }).collect()),
    }
}

#[inline]
fn saturate_f32(v: f32) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.round().clamp(0.0, 255.0) as u8
    }
}
