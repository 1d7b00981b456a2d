//! Stroke thickness normalizer.

use baybayin_core::{GrayImage, GrayImageView};

use crate::morphology::dilate;

/// Fraction of pixels equal to 0.
pub fn ink_fraction(src: &GrayImageView<'_>) -> f64 {
    if src.data.is_empty() {
        return 0.0;
    }
    let ink = src.data.iter().filter(|&&v| v == 0).count();
    ink as f64 / src.data.len() as f64
}

/// Erode the ink once when the ink fraction is strictly above `threshold`.
///
/// Ink is 0 at this point, so eroding it is a maximum filter over the
/// intensities. Single shot: the fraction is not re-checked afterwards.
/// Returns the image and whether thinning was applied.
pub fn normalize_stroke_thickness(
    src: &GrayImageView<'_>,
    threshold: f64,
    kernel: [usize; 2],
) -> (GrayImage, bool) {
    let fraction = ink_fraction(src);
    if fraction > threshold {
        log::debug!(
            "stroke: ink fraction {:.3} > {:.3}, thinning with {:?}",
            fraction,
            threshold,
            kernel
        );
        (dilate(src, kernel), true)
    } else {
        (src.to_image(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 64x64 canvas with a 32x32 ink block at (16, 16) plus `extra` ink
    /// pixels along the row just right of it.
    fn block_with_extra(extra: usize) -> GrayImage {
        GrayImage::from_fn(64, 64, |x, y| {
            let in_block = (16..48).contains(&x) && (16..48).contains(&y);
            let in_extra = y == 16 && x >= 48 && x < 48 + extra;
            if in_block || in_extra {
                0
            } else {
                255
            }
        })
    }

    #[test]
    fn fraction_counts_only_pure_black() {
        let mut img = GrayImage::filled(4, 4, 255);
        img.set(0, 0, 0);
        img.set(1, 0, 1);
        assert_relative_eq!(ink_fraction(&img.view()), 1.0 / 16.0);
    }

    #[test]
    fn exactly_at_threshold_is_left_alone() {
        let img = block_with_extra(0); // 1024 / 4096 == 0.25
        let (out, thinned) = normalize_stroke_thickness(&img.view(), 0.25, [2, 2]);
        assert!(!thinned);
        assert_eq!(out, img);
    }

    #[test]
    fn one_pixel_above_threshold_is_thinned_once() {
        let img = block_with_extra(1);
        assert_eq!(img.count_value(0), 1025);
        let (out, thinned) = normalize_stroke_thickness(&img.view(), 0.25, [2, 2]);
        assert!(thinned);
        // The block loses its top row and left column; the spur disappears.
        assert_eq!(out.count_value(0), 31 * 31);
    }

    /// 10x10 canvas whose last `ink` pixels in row-major order are black.
    fn trailing_ink(ink: usize) -> GrayImage {
        GrayImage::from_fn(10, 10, |x, y| if y * 10 + x >= 100 - ink { 0 } else { 255 })
    }

    #[test]
    fn decimal_thresholds_compare_strictly() {
        for (threshold, ink) in [(0.7, 70), (0.35, 35), (0.9, 90), (0.3, 30)] {
            let img = trailing_ink(ink);
            let (_, at) = normalize_stroke_thickness(&img.view(), threshold, [2, 2]);
            assert!(!at, "threshold {threshold} with {ink}/100 ink");

            let img = trailing_ink(ink + 1);
            let (out, above) = normalize_stroke_thickness(&img.view(), threshold, [2, 2]);
            assert!(above, "threshold {threshold} with {}/100 ink", ink + 1);
            assert!(out.count_value(0) < ink + 1);
        }
    }

    #[test]
    fn thinning_is_not_repeated() {
        let img = GrayImage::from_fn(64, 64, |x, y| {
            if (4..60).contains(&x) && (4..60).contains(&y) {
                0
            } else {
                255
            }
        });
        let (once, thinned) = normalize_stroke_thickness(&img.view(), 0.25, [2, 2]);
        assert!(thinned);
        // Still far above the threshold, but only a single pass is applied.
        assert!(ink_fraction(&once.view()) > 0.25);
        assert_eq!(once.count_value(0), 55 * 55);
    }
}
