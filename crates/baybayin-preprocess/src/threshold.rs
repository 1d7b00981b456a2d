//! Global binarization with an automatically selected (Otsu) threshold.

use baybayin_core::{GrayImage, GrayImageView};

/// 256-bin intensity histogram.
pub fn histogram(src: &GrayImageView<'_>) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for &v in src.data {
        hist[v as usize] += 1;
    }
    hist
}

/// Compute the Otsu threshold of a histogram.
///
/// Returns the first `t` maximizing the between-class variance of the
/// populations `<= t` and `> t`. A single-valued histogram has no valid
/// split and yields `0`.
pub fn otsu_threshold(hist: &[u32; 256]) -> u8 {
    let total: f64 = hist.iter().map(|&h| h as f64).sum();
    if total < 1.0 {
        return 0;
    }

    let mut sum_total = 0f64;
    for (i, &h) in hist.iter().enumerate() {
        sum_total += (i as f64) * (h as f64);
    }

    let mut sum_b = 0f64;
    let mut w_b = 0f64;
    let mut best_var = 0f64;
    let mut best_t = 0u8;

    for (t, &h) in hist.iter().enumerate() {
        w_b += h as f64;
        sum_b += (t as f64) * (h as f64);
        if w_b < 1.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f < 1.0 {
            break;
        }

        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;

        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            best_t = t as u8;
        }
    }

    best_t
}

/// Map pixels `> t` to 255 and everything else to 0.
pub fn binarize(src: &GrayImageView<'_>, t: u8) -> GrayImage {
    GrayImage {
        width: src.width,
        height: src.height,
        data: src.data.iter().map(|&v| if v > t { 255 } else { 0 }).collect(),
    }
}

/// Binarize with the image's own Otsu threshold; returns the image and `t*`.
pub fn binarize_otsu(src: &GrayImageView<'_>) -> (GrayImage, u8) {
    let t = otsu_threshold(&histogram(src));
    log::debug!("otsu threshold t*={}", t);
    (binarize(src, t), t)
}
