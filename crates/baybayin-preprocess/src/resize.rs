//! Aspect-preserving resize onto a fixed background canvas.

use baybayin_core::{GrayImage, GrayImageView};

use crate::denoise::round_u8;

/// Background value used for canvas padding.
pub const BACKGROUND: u8 = 255;

/// Resample by area averaging.
///
/// Every destination pixel is the mean of the source area it covers, with
/// partially covered source pixels weighted by overlap. Works for both
/// shrinking and enlarging.
pub fn resize_area(src: &GrayImageView<'_>, dst_w: usize, dst_h: usize) -> GrayImage {
    if dst_w == src.width && dst_h == src.height {
        return src.to_image();
    }
    let x_taps = area_taps(src.width, dst_w);
    let y_taps = area_taps(src.height, dst_h);

    let mut out = GrayImage::filled(dst_w, dst_h, 0);
    for (y, ys) in y_taps.iter().enumerate() {
        for (x, xs) in x_taps.iter().enumerate() {
            let mut acc = 0f64;
            for &(sy, wy) in ys {
                let row = src.row(sy);
                let mut row_acc = 0f64;
                for &(sx, wx) in xs {
                    row_acc += row[sx] as f64 * wx;
                }
                acc += row_acc * wy;
            }
            out.set(x, y, round_u8(acc as f32));
        }
    }
    out
}

/// Source indices and normalized weights for each destination index.
fn area_taps(src_n: usize, dst_n: usize) -> Vec<Vec<(usize, f64)>> {
    let ratio = src_n as f64 / dst_n as f64;
    (0..dst_n)
        .map(|d| {
            let start = d as f64 * ratio;
            let end = ((d + 1) as f64 * ratio).min(src_n as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_n);
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min(s as f64 + 1.0) - start.max(s as f64);
                    (overlap > 1e-9).then_some((s, overlap / ratio))
                })
                .collect()
        })
        .collect()
}

/// Size of `(w, h)` scaled to fit `(target_w, target_h)` without distortion.
pub fn fitted_size(w: usize, h: usize, target_w: usize, target_h: usize) -> (usize, usize, f64) {
    let scale = (target_w as f64 / w as f64).min(target_h as f64 / h as f64);
    let new_w = ((w as f64 * scale).round() as usize).clamp(1, target_w);
    let new_h = ((h as f64 * scale).round() as usize).clamp(1, target_h);
    (new_w, new_h, scale)
}

/// Scale into a `target_w x target_h` background canvas, centered.
///
/// Offsets are `(target - resized) / 2` with integer division, so any odd
/// leftover pixel goes to the right/bottom margin.
pub fn resize_with_padding(src: &GrayImageView<'_>, target_w: usize, target_h: usize) -> GrayImage {
    let (new_w, new_h, scale) = fitted_size(src.width, src.height, target_w, target_h);
    let resized = resize_area(src, new_w, new_h);

    let mut canvas = GrayImage::filled(target_w, target_h, BACKGROUND);
    let x_off = (target_w - new_w) / 2;
    let y_off = (target_h - new_h) / 2;
    canvas.paste(&resized.view(), x_off, y_off);

    log::debug!(
        "resize: {}x{} -> {}x{} (scale {:.3}) at offset ({}, {})",
        src.width,
        src.height,
        new_w,
        new_h,
        scale,
        x_off,
        y_off
    );
    canvas
}
