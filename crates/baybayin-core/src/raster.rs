//! Source-agnostic raster buffers.
//!
//! A [`Raster`] is what every upstream source (file upload, drawing canvas)
//! collapses into before preprocessing. Samples are channel-last and
//! row-major; the sample type is kept as delivered so the input normalizer
//! can apply the matching conversion to 8 bits.

use serde::{Deserialize, Serialize};

/// Errors for malformed rasters.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    #[error("raster has zero area (width={width}, height={height})")]
    Empty { width: usize, height: usize },
    #[error("unsupported channel count {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(usize),
    #[error("invalid raster buffer length (expected {expected} samples, got {got})")]
    BufferLength { expected: usize, got: usize },
}

/// Raw sample storage, one variant per supported sample type.
#[derive(Clone, Debug, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
    Bool(Vec<bool>),
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Samples::U8(v) => v.len(),
            Samples::U16(v) => v.len(),
            Samples::F32(v) => v.len(),
            Samples::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> SampleKind {
        match self {
            Samples::U8(_) => SampleKind::U8,
            Samples::U16(_) => SampleKind::U16,
            Samples::F32(_) => SampleKind::F32,
            Samples::Bool(_) => SampleKind::Bool,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    U8,
    U16,
    F32,
    Bool,
}

/// Channel-last raster with 1 (gray), 3 (RGB) or 4 (RGBA) channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub samples: Samples,
}

impl Raster {
    /// Build a raster and check its invariants.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        samples: Samples,
    ) -> Result<Self, RasterError> {
        let raster = Self {
            width,
            height,
            channels,
            samples,
        };
        raster.validate()?;
        Ok(raster)
    }

    pub fn gray_u8(width: usize, height: usize, data: Vec<u8>) -> Result<Self, RasterError> {
        Self::new(width, height, 1, Samples::U8(data))
    }

    pub fn rgb_u8(width: usize, height: usize, data: Vec<u8>) -> Result<Self, RasterError> {
        Self::new(width, height, 3, Samples::U8(data))
    }

    pub fn rgba_u8(width: usize, height: usize, data: Vec<u8>) -> Result<Self, RasterError> {
        Self::new(width, height, 4, Samples::U8(data))
    }

    /// Check dimensions, channel count and buffer length.
    ///
    /// Fields are public, so consumers re-run this before trusting a raster.
    pub fn validate(&self) -> Result<(), RasterError> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::Empty {
                width: self.width,
                height: self.height,
            });
        }
        if !matches!(self.channels, 1 | 3 | 4) {
            return Err(RasterError::UnsupportedChannels(self.channels));
        }
        let expected = self
            .width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(self.channels))
            .ok_or(RasterError::Empty {
                width: self.width,
                height: self.height,
            })?;
        if self.samples.len() != expected {
            return Err(RasterError::BufferLength {
                expected,
                got: self.samples.len(),
            });
        }
        Ok(())
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

impl From<crate::GrayImage> for Raster {
    fn from(img: crate::GrayImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            channels: 1,
            samples: Samples::U8(img.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_area() {
        let err = Raster::gray_u8(0, 4, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            RasterError::Empty {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn rejects_two_channel_buffers() {
        let err = Raster::new(2, 2, 2, Samples::U8(vec![0; 8])).unwrap_err();
        assert_eq!(err, RasterError::UnsupportedChannels(2));
    }

    #[test]
    fn rejects_short_buffers() {
        let err = Raster::rgb_u8(2, 2, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            RasterError::BufferLength {
                expected: 12,
                got: 11
            }
        );
    }

    #[test]
    fn gray_image_converts_to_single_channel_raster() {
        let raster = Raster::from(crate::GrayImage::filled(3, 2, 7));
        assert_eq!(raster.channels, 1);
        assert_eq!(raster.samples.kind(), SampleKind::U8);
        assert!(raster.validate().is_ok());
    }
}
