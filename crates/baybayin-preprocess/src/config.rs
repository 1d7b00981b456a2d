//! Pipeline configuration.
//!
//! A [`PipelineConfig`] is built once at process start (defaults or a JSON
//! file), validated, and then passed by reference into every pipeline call.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Edge-preserving smoothing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BilateralParams {
    /// Neighborhood diameter in pixels; the filter uses a disc of radius `diameter / 2`.
    pub diameter: usize,
    /// Range sigma on the 0..255 intensity scale.
    pub sigma_color: f32,
    /// Spatial sigma in pixels.
    pub sigma_space: f32,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            diameter: 9,
            sigma_color: 75.0,
            sigma_space: 75.0,
        }
    }
}

/// Contrast-limited tiled histogram equalization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaheParams {
    /// Contrast amplification bound, relative to a flat histogram.
    pub clip_limit: f32,
    /// Tile grid as `[columns, rows]`.
    pub tile_grid: [usize; 2],
}

impl Default for ClaheParams {
    fn default() -> Self {
        Self {
            clip_limit: 2.0,
            tile_grid: [8, 8],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaussianParams {
    /// Kernel `[width, height]`; both odd.
    pub kernel_size: [usize; 2],
    /// Standard deviation; `0.0` derives it from the kernel size.
    pub sigma: f32,
}

impl Default for GaussianParams {
    fn default() -> Self {
        Self {
            kernel_size: [3, 3],
            sigma: 0.0,
        }
    }
}

/// Rectangular structuring elements, each `[width, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MorphologyParams {
    /// Opening kernel (speckle removal).
    pub small: [usize; 2],
    /// Closing kernel (gap filling).
    pub medium: [usize; 2],
}

impl Default for MorphologyParams {
    fn default() -> Self {
        Self {
            small: [2, 2],
            medium: [3, 3],
        }
    }
}

/// Full parameter set of the normalization pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub bilateral: BilateralParams,
    pub clahe: ClaheParams,
    pub gaussian: GaussianParams,
    pub morphology: MorphologyParams,
    /// Padding in pixels added around the ink bounding box before resizing.
    pub crop_padding: usize,
    /// Ink fraction above which strokes are thinned once.
    pub thickness_threshold: f64,
    /// Erosion kernel `[width, height]` used for stroke thinning.
    pub thinning_kernel: [usize; 2],
    /// Output canvas `[width, height]`; must match the classifier input.
    pub target_size: [usize; 2],
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bilateral: BilateralParams::default(),
            clahe: ClaheParams::default(),
            gaussian: GaussianParams::default(),
            morphology: MorphologyParams::default(),
            crop_padding: 5,
            thickness_threshold: 0.3,
            thinning_kernel: [2, 2],
            target_size: [64, 64],
        }
    }
}

/// Rejected configuration values.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("bilateral diameter must be at least 1")]
    BilateralDiameter,
    #[error("bilateral sigmas must be positive (color={color}, space={space})")]
    BilateralSigma { color: f32, space: f32 },
    #[error("CLAHE clip limit must be positive, got {0}")]
    ClipLimit(f32),
    #[error("CLAHE tile grid must be non-zero, got {0:?}")]
    TileGrid([usize; 2]),
    #[error("Gaussian kernel sizes must be odd and non-zero, got {0:?}")]
    GaussianKernel([usize; 2]),
    #[error("Gaussian sigma must be >= 0, got {0}")]
    GaussianSigma(f32),
    #[error("{name} kernel must be non-zero, got {size:?}")]
    Kernel { name: &'static str, size: [usize; 2] },
    #[error("thickness threshold must lie in (0, 1), got {0}")]
    ThicknessThreshold(f64),
    #[error("target size must be non-zero, got {0:?}")]
    TargetSize([usize; 2]),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

impl PipelineConfig {
    pub fn target_width(&self) -> usize {
        self.target_size[0]
    }

    pub fn target_height(&self) -> usize {
        self.target_size[1]
    }

    /// Check every parameter; call once after building or loading a config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.bilateral;
        if b.diameter == 0 {
            return Err(ConfigError::BilateralDiameter);
        }
        if !(b.sigma_color > 0.0 && b.sigma_space > 0.0) {
            return Err(ConfigError::BilateralSigma {
                color: b.sigma_color,
                space: b.sigma_space,
            });
        }
        if !(self.clahe.clip_limit > 0.0) {
            return Err(ConfigError::ClipLimit(self.clahe.clip_limit));
        }
        if self.clahe.tile_grid.contains(&0) {
            return Err(ConfigError::TileGrid(self.clahe.tile_grid));
        }
        let g = &self.gaussian;
        if g.kernel_size.iter().any(|&k| k == 0 || k % 2 == 0) {
            return Err(ConfigError::GaussianKernel(g.kernel_size));
        }
        if !(g.sigma >= 0.0) {
            return Err(ConfigError::GaussianSigma(g.sigma));
        }
        for (name, size) in [
            ("opening", self.morphology.small),
            ("closing", self.morphology.medium),
            ("thinning", self.thinning_kernel),
        ] {
            if size.contains(&0) {
                return Err(ConfigError::Kernel { name, size });
            }
        }
        if !(self.thickness_threshold > 0.0 && self.thickness_threshold < 1.0) {
            return Err(ConfigError::ThicknessThreshold(self.thickness_threshold));
        }
        if self.target_size.contains(&0) {
            return Err(ConfigError::TargetSize(self.target_size));
        }
        Ok(())
    }

    /// Load and validate a JSON config. Missing fields take their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
