//! Flat rectangular morphology.
//!
//! A `[w, h]` structuring element is anchored at `(w / 2, h / 2)`, so the
//! window for pixel `x` spans `x - w/2 ..= x - w/2 + w - 1` (and likewise
//! vertically). Pixels outside the image never contribute.

use baybayin_core::{GrayImage, GrayImageView};

use crate::config::MorphologyParams;

/// Minimum over the structuring element.
pub fn erode(src: &GrayImageView<'_>, kernel: [usize; 2]) -> GrayImage {
    rank_filter(src, kernel, u8::min)
}

/// Maximum over the structuring element.
pub fn dilate(src: &GrayImageView<'_>, kernel: [usize; 2]) -> GrayImage {
    rank_filter(src, kernel, u8::max)
}

/// Erosion followed by dilation.
pub fn open(src: &GrayImageView<'_>, kernel: [usize; 2]) -> GrayImage {
    dilate(&erode(src, kernel).view(), kernel)
}

/// Dilation followed by erosion.
pub fn close(src: &GrayImageView<'_>, kernel: [usize; 2]) -> GrayImage {
    erode(&dilate(src, kernel).view(), kernel)
}

/// Opening with the small kernel, then closing with the medium one.
pub fn clean_binary(src: &GrayImageView<'_>, params: &MorphologyParams) -> GrayImage {
    let opened = open(src, params.small);
    close(&opened.view(), params.medium)
}

// Rectangles are separable: reduce along rows, then along columns.
fn rank_filter(src: &GrayImageView<'_>, kernel: [usize; 2], pick: fn(u8, u8) -> u8) -> GrayImage {
    let (w, h) = (src.width, src.height);
    let [kw, kh] = kernel;

    let mut rows = GrayImage::filled(w, h, 0);
    for y in 0..h {
        let row = src.row(y);
        for x in 0..w {
            let (lo, hi) = window(x, kw, w);
            let v = row[lo..=hi].iter().copied().reduce(pick).unwrap_or(row[x]);
            rows.set(x, y, v);
        }
    }

    let mut out = GrayImage::filled(w, h, 0);
    for y in 0..h {
        let (lo, hi) = window(y, kh, h);
        for x in 0..w {
            let v = (lo..=hi).map(|yy| rows.get(x, yy)).reduce(pick).unwrap_or(0);
            out.set(x, y, v);
        }
    }
    out
}

/// Inclusive source range covered by a kernel of size `k` at position `p`.
#[inline]
fn window(p: usize, k: usize, n: usize) -> (usize, usize) {
    let anchor = k / 2;
    let lo = p.saturating_sub(anchor);
    let hi = (p + (k - 1 - anchor)).min(n - 1);
    (lo, hi)
}
