//! JSON report written by `baybayin classify --report`.

use std::fs;
use std::path::Path;

use baybayin_classifier::{Prediction, Recognition};
use baybayin_preprocess::{PipelineConfig, PreprocessSummary};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Everything needed to reproduce and inspect one recognition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecognitionReport {
    pub input: String,
    #[serde(default)]
    pub canvas: bool,
    pub config: PipelineConfig,
    pub summary: PreprocessSummary,
    pub top: Vec<Prediction>,
    /// Raw classifier scores in label order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<f32>,
}

impl RecognitionReport {
    pub fn new(
        input: impl Into<String>,
        canvas: bool,
        config: &PipelineConfig,
        recognition: &Recognition,
    ) -> Self {
        Self {
            input: input.into(),
            canvas,
            config: config.clone(),
            summary: recognition.summary.clone(),
            top: recognition.top.clone(),
            scores: recognition.scores.clone(),
        }
    }

    pub fn best(&self) -> Option<&Prediction> {
        self.top.first()
    }

    /// Load a report from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
