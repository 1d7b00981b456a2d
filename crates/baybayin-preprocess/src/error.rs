use baybayin_core::RasterError;
use std::fmt;

use crate::config::ConfigError;

/// Pipeline stages that can fault after the input has been accepted.
///
/// The other stages are total over a validated raster and config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Stage {
    TensorPack,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::TensorPack => f.write_str("tensor packer"),
        }
    }
}

/// Errors produced while turning a raster into a classifier tensor.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PreprocessError {
    #[error("invalid input raster: {0}")]
    Input(#[from] RasterError),
    #[error("invalid pipeline configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{stage} failed: {reason}")]
    Stage { stage: Stage, reason: String },
}

impl PreprocessError {
    pub(crate) fn stage(stage: Stage, reason: impl Into<String>) -> Self {
        Self::Stage {
            stage,
            reason: reason.into(),
        }
    }

    /// `true` when the raster itself was rejected rather than a later stage failing.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}
