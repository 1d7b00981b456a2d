//! Tensor packer: 8-bit image to a `[1, H, W, 1]` float tensor in `[0, 1]`.

use baybayin_core::{GrayImage, GrayImageView};
use ndarray::{Array4, ArrayView4};

use crate::error::Stage;
use crate::PreprocessError;

/// Classifier input for one character, NHWC with batch and channel of 1.
///
/// Built fresh for every request and consumed by the classifier.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterTensor {
    data: Array4<f32>,
}

impl CharacterTensor {
    /// Scale `src` to `[0, 1]` and add the batch and channel axes.
    pub fn from_image(src: &GrayImageView<'_>) -> Result<Self, PreprocessError> {
        let values: Vec<f32> = src.data.iter().map(|&v| v as f32 / 255.0).collect();
        let data = Array4::from_shape_vec((1, src.height, src.width, 1), values)
            .map_err(|e| PreprocessError::stage(Stage::TensorPack, e.to_string()))?;
        Ok(Self { data })
    }

    /// `[batch, height, width, channels]`.
    pub fn shape(&self) -> [usize; 4] {
        let s = self.data.shape();
        [s[0], s[1], s[2], s[3]]
    }

    pub fn height(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn width(&self) -> usize {
        self.data.shape()[2]
    }

    pub fn view(&self) -> ArrayView4<'_, f32> {
        self.data.view()
    }

    pub fn as_array(&self) -> &Array4<f32> {
        &self.data
    }

    pub fn into_array(self) -> Array4<f32> {
        self.data
    }

    /// Row-major values, `height * width` long.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }

    /// Render back to 8 bits for display.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage {
            width: self.width(),
            height: self.height(),
            data: self
                .values()
                .map(|v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn packs_nhwc_with_unit_range() {
        let img = GrayImage::from_raw(3, 2, vec![0, 51, 255, 255, 102, 0]).expect("img");
        let t = CharacterTensor::from_image(&img.view()).expect("tensor");
        assert_eq!(t.shape(), [1, 2, 3, 1]);
        assert_relative_eq!(t.view()[[0, 0, 1, 0]], 0.2);
        assert_relative_eq!(t.view()[[0, 1, 1, 0]], 0.4);
        assert_relative_eq!(t.view()[[0, 0, 2, 0]], 1.0);
        assert!(t.values().all(|v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn renders_back_to_the_same_pixels() {
        let img = GrayImage::from_fn(5, 4, |x, y| (x * 50 + y * 3) as u8);
        let t = CharacterTensor::from_image(&img.view()).expect("tensor");
        assert_eq!(t.to_gray_image(), img);
    }

    #[test]
    fn inconsistent_view_is_a_stage_error() {
        let data = [0u8; 5];
        let view = GrayImageView {
            width: 3,
            height: 2,
            data: &data,
        };
        let err = CharacterTensor::from_image(&view).unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::Stage {
                stage: Stage::TensorPack,
                ..
            }
        ));
    }
}
