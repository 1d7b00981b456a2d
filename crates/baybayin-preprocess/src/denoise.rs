//! Denoise and contrast stage: bilateral smoothing, CLAHE, Gaussian blur.
//!
//! All three filters extrapolate borders by mirroring without repeating the
//! edge pixel and round their results to the nearest integer.

use baybayin_core::{GrayImage, GrayImageView};

use crate::border::reflect101;
use crate::config::{BilateralParams, ClaheParams, GaussianParams, PipelineConfig};

/// Run the three sub-steps in order with the configured parameters.
pub fn denoise_and_equalize(src: &GrayImageView<'_>, cfg: &PipelineConfig) -> GrayImage {
    let smoothed = bilateral_filter(src, &cfg.bilateral);
    let equalized = clahe(&smoothed.view(), &cfg.clahe);
    gaussian_blur(&equalized.view(), &cfg.gaussian)
}

/// Edge-preserving bilateral filter over a disc of radius `diameter / 2`.
pub fn bilateral_filter(src: &GrayImageView<'_>, params: &BilateralParams) -> GrayImage {
    let radius = (params.diameter / 2).max(1) as isize;
    let color_coeff = -0.5 / (params.sigma_color * params.sigma_color);
    let space_coeff = -0.5 / (params.sigma_space * params.sigma_space);

    let color_weight: Vec<f32> = (0..256)
        .map(|i| ((i * i) as f32 * color_coeff).exp())
        .collect();

    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f32;
            if r2.sqrt() > radius as f32 {
                continue;
            }
            offsets.push((dx, dy, (r2 * space_coeff).exp()));
        }
    }

    let (w, h) = (src.width, src.height);
    let mut out = GrayImage::filled(w, h, 0);
    for y in 0..h {
        for x in 0..w {
            let center = src.get(x, y);
            let mut sum = 0f32;
            let mut wsum = 0f32;
            for &(dx, dy, space_w) in &offsets {
                let sx = reflect101(x as isize + dx, w);
                let sy = reflect101(y as isize + dy, h);
                let v = src.get(sx, sy);
                let weight = space_w * color_weight[v.abs_diff(center) as usize];
                sum += v as f32 * weight;
                wsum += weight;
            }
            out.set(x, y, round_u8(sum / wsum));
        }
    }
    out
}

/// Contrast-limited adaptive histogram equalization.
///
/// The image is split into `tile_grid` tiles (padded by mirroring when the
/// size is not divisible); each tile gets a clipped, redistributed histogram
/// turned into a lookup table, and pixels blend the four nearest tile tables
/// bilinearly.
pub fn clahe(src: &GrayImageView<'_>, params: &ClaheParams) -> GrayImage {
    let [tiles_x, tiles_y] = params.tile_grid;
    let (w, h) = (src.width, src.height);

    let (ext_w, ext_h) = if w % tiles_x == 0 && h % tiles_y == 0 {
        (w, h)
    } else {
        (w + tiles_x - w % tiles_x, h + tiles_y - h % tiles_y)
    };
    let tile_w = ext_w / tiles_x;
    let tile_h = ext_h / tiles_y;
    let tile_area = tile_w * tile_h;
    let lut_scale = 255.0 / tile_area as f32;
    let clip_limit = ((params.clip_limit * tile_area as f32 / 256.0) as usize).max(1);

    let mut luts = vec![[0u8; 256]; tiles_x * tiles_y];
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let mut hist = [0usize; 256];
            for y in ty * tile_h..(ty + 1) * tile_h {
                let sy = reflect101(y as isize, h);
                for x in tx * tile_w..(tx + 1) * tile_w {
                    hist[src.get(reflect101(x as isize, w), sy) as usize] += 1;
                }
            }
            clip_histogram(&mut hist, clip_limit);

            let lut = &mut luts[ty * tiles_x + tx];
            let mut cumulative = 0usize;
            for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
                cumulative += count;
                *entry = round_u8(cumulative as f32 * lut_scale);
            }
        }
    }

    let x_taps: Vec<(usize, usize, f32)> = (0..w)
        .map(|x| tile_taps(x, tile_w, tiles_x))
        .collect();
    let mut out = GrayImage::filled(w, h, 0);
    for y in 0..h {
        let (ty1, ty2, ya) = tile_taps(y, tile_h, tiles_y);
        for (x, &(tx1, tx2, xa)) in x_taps.iter().enumerate() {
            let v = src.get(x, y) as usize;
            let top = luts[ty1 * tiles_x + tx1][v] as f32 * (1.0 - xa)
                + luts[ty1 * tiles_x + tx2][v] as f32 * xa;
            let bottom = luts[ty2 * tiles_x + tx1][v] as f32 * (1.0 - xa)
                + luts[ty2 * tiles_x + tx2][v] as f32 * xa;
            out.set(x, y, round_u8(top * (1.0 - ya) + bottom * ya));
        }
    }
    out
}

/// Clip bins at `limit` and hand the excess back uniformly, spreading the
/// remainder over evenly spaced bins.
fn clip_histogram(hist: &mut [usize; 256], limit: usize) {
    let mut clipped = 0usize;
    for bin in hist.iter_mut() {
        if *bin > limit {
            clipped += *bin - limit;
            *bin = limit;
        }
    }

    let batch = clipped / 256;
    let mut residual = clipped - batch * 256;
    for bin in hist.iter_mut() {
        *bin += batch;
    }
    if residual > 0 {
        let step = (256 / residual).max(1);
        let mut i = 0;
        while i < 256 && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }
}

/// Neighbouring tile indices and blend weight for one pixel coordinate.
fn tile_taps(p: usize, tile: usize, tiles: usize) -> (usize, usize, f32) {
    let f = p as f32 / tile as f32 - 0.5;
    let lo = f.floor();
    let alpha = f - lo;
    let lo = lo as isize;
    let t1 = lo.max(0) as usize;
    let t2 = ((lo + 1).max(0) as usize).min(tiles - 1);
    (t1, t2, alpha)
}

/// Separable Gaussian blur.
pub fn gaussian_blur(src: &GrayImageView<'_>, params: &GaussianParams) -> GrayImage {
    let [kw, kh] = params.kernel_size;
    let kx = gaussian_kernel(kw, params.sigma);
    let ky = gaussian_kernel(kh, params.sigma);
    let (w, h) = (src.width, src.height);
    let (rx, ry) = ((kw / 2) as isize, (kh / 2) as isize);

    let mut horizontal = vec![0f32; w * h];
    for y in 0..h {
        let row = src.row(y);
        for x in 0..w {
            horizontal[y * w + x] = kx
                .iter()
                .enumerate()
                .map(|(k, &c)| c * row[reflect101(x as isize + k as isize - rx, w)] as f32)
                .sum();
        }
    }

    let mut out = GrayImage::filled(w, h, 0);
    for y in 0..h {
        for x in 0..w {
            let v: f32 = ky
                .iter()
                .enumerate()
                .map(|(k, &c)| c * horizontal[reflect101(y as isize + k as isize - ry, h) * w + x])
                .sum();
            out.set(x, y, round_u8(v));
        }
    }
    out
}

/// 1-D Gaussian kernel of odd length `n`, normalized to sum 1.
///
/// With `sigma <= 0` small kernels use the classic binomial tables and larger
/// ones derive `sigma = 0.3 * ((n - 1) / 2 - 1) + 0.8`.
pub fn gaussian_kernel(n: usize, sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        let fixed: Option<&[f32]> = match n {
            1 => Some(&[1.0]),
            3 => Some(&[0.25, 0.5, 0.25]),
            5 => Some(&[0.0625, 0.25, 0.375, 0.25, 0.0625]),
            7 => Some(&[
                0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
            ]),
            _ => None,
        };
        if let Some(k) = fixed {
            return k.to_vec();
        }
    }

    let sigma = if sigma > 0.0 {
        sigma as f64
    } else {
        0.3 * ((n as f64 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let scale = -0.5 / (sigma * sigma);
    let half = (n / 2) as f64;
    let raw: Vec<f64> = (0..n)
        .map(|i| {
            let x = i as f64 - half;
            (scale * x * x).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.iter().map(|&v| (v / sum) as f32).collect()
}

#[inline]
pub(crate) fn round_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
