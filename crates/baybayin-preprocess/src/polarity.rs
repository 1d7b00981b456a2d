//! Polarity normalizer: dark ink on a light background.

use baybayin_core::{GrayImage, GrayImageView};

/// Invert the binary image when black pixels outnumber white ones.
///
/// The majority colour is taken to be background. Characters whose ink
/// covers more than half of the frame are therefore inverted wrongly; the
/// classifier was trained on this convention, so the rule stays as is.
///
/// Returns the normalized image and whether it was inverted.
pub fn normalize_polarity(src: &GrayImageView<'_>) -> (GrayImage, bool) {
    let black = src.data.iter().filter(|&&v| v == 0).count();
    let white = src.data.iter().filter(|&&v| v == 255).count();

    if black > white {
        log::debug!("polarity: {} black > {} white, inverting", black, white);
        let data = src.data.iter().map(|&v| 255 - v).collect();
        (
            GrayImage {
                width: src.width,
                height: src.height,
                data,
            },
            true,
        )
    } else {
        (src.to_image(), false)
    }
}
