//! Content cropper.

use baybayin_core::{GrayImage, GrayImageView};
use serde::{Deserialize, Serialize};

/// Inclusive pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl BoundingBox {
    pub fn width(&self) -> usize {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0 + 1
    }

    /// Grow by `pad` on every side, clamped to a `w x h` image.
    pub fn expand(&self, pad: usize, w: usize, h: usize) -> BoundingBox {
        BoundingBox {
            x0: self.x0.saturating_sub(pad),
            y0: self.y0.saturating_sub(pad),
            x1: (self.x1 + pad).min(w - 1),
            y1: (self.y1 + pad).min(h - 1),
        }
    }

    /// Center in pixel coordinates.
    pub fn center(&self) -> (f32, f32) {
        (
            (self.x0 + self.x1) as f32 * 0.5,
            (self.y0 + self.y1) as f32 * 0.5,
        )
    }
}

/// Bounding box of all pixels strictly darker than 255.
pub fn ink_bounding_box(src: &GrayImageView<'_>) -> Option<BoundingBox> {
    let mut bbox: Option<BoundingBox> = None;
    for y in 0..src.height {
        for (x, &v) in src.row(y).iter().enumerate() {
            if v == 255 {
                continue;
            }
            bbox = Some(match bbox {
                None => BoundingBox {
                    x0: x,
                    y0: y,
                    x1: x,
                    y1: y,
                },
                Some(b) => BoundingBox {
                    x0: b.x0.min(x),
                    y0: b.y0,
                    x1: b.x1.max(x),
                    y1: y,
                },
            });
        }
    }
    bbox
}

/// Crop to the padded ink bounding box.
///
/// A blank image (no pixel below 255) is returned unchanged together with
/// `None`.
pub fn crop_to_content(src: &GrayImageView<'_>, padding: usize) -> (GrayImage, Option<BoundingBox>) {
    let Some(ink) = ink_bounding_box(src) else {
        log::debug!("crop: no ink found, keeping {}x{} image", src.width, src.height);
        return (src.to_image(), None);
    };

    let b = ink.expand(padding, src.width, src.height);
    log::debug!("crop: ink {:?} padded to {:?}", ink, b);
    let img = src.sub_image(b.x0, b.y0, b.width(), b.height());
    (img, Some(b))
}
