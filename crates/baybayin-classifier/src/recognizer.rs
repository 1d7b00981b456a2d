//! Request handling: model handle, preprocessing, prediction and ranking.

use std::fmt::Display;
use std::sync::Arc;

use baybayin_core::{GrayImage, Raster};
use baybayin_preprocess::{
    preprocess_detailed, CharacterTensor, ConfigError, PipelineConfig, PreprocessError,
    PreprocessSummary,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::classifier::{Classifier, ClassifierError};
use crate::labels::{LabelTable, NUM_CLASSES};
use crate::ranking::{rank, Prediction};

/// Number of predictions shown to users by default.
pub const DEFAULT_TOP_K: usize = 5;

/// Failures reported to the caller of a recognition request.
///
/// Stage-specific preprocessing faults are collapsed into `Processing`.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecognizeError {
    #[error("invalid input image: {0}")]
    Input(String),
    #[error("image processing failed: {0}")]
    Processing(String),
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
}

impl From<PreprocessError> for RecognizeError {
    fn from(err: PreprocessError) -> Self {
        if err.is_input_error() {
            RecognizeError::Input(err.to_string())
        } else {
            RecognizeError::Processing(err.to_string())
        }
    }
}

/// A backend that cannot initialize is unavailable; anything that goes wrong
/// while scoring a tensor counts as a processing failure.
impl From<ClassifierError> for RecognizeError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::Init(_) | ClassifierError::ModelNotFound(_) => {
                RecognizeError::ModelUnavailable(err.to_string())
            }
            ClassifierError::Inference(_) | ClassifierError::OutputShape { .. } => {
                RecognizeError::Processing(err.to_string())
            }
        }
    }
}

/// Errors building a [`Recognizer`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("classifier expects {model:?} input but pipeline produces {pipeline:?}")]
    InputSizeMismatch {
        model: [usize; 2],
        pipeline: [usize; 2],
    },
}

enum ModelState {
    Ready(Box<dyn Classifier>),
    Unavailable(String),
}

/// Result of the one-time classifier initialization.
///
/// Created once at startup and shared for the rest of the process; a failed
/// load is remembered so every request fails fast instead of retrying.
pub struct ModelHandle {
    state: ModelState,
}

impl ModelHandle {
    /// Run `loader` once and keep either the classifier or the failure.
    pub fn load<C, E, F>(loader: F) -> Self
    where
        C: Classifier + 'static,
        E: Display,
        F: FnOnce() -> Result<C, E>,
    {
        match loader() {
            Ok(classifier) => {
                log::info!("classifier loaded");
                Self::ready(classifier)
            }
            Err(err) => {
                log::error!("classifier failed to load: {}", err);
                Self::unavailable(err.to_string())
            }
        }
    }

    pub fn ready(classifier: impl Classifier + 'static) -> Self {
        Self {
            state: ModelState::Ready(Box::new(classifier)),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unavailable(reason.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    pub fn classifier(&self) -> Result<&dyn Classifier, RecognizeError> {
        match &self.state {
            ModelState::Ready(c) => Ok(c.as_ref()),
            ModelState::Unavailable(reason) => Err(RecognizeError::ModelUnavailable(reason.clone())),
        }
    }
}

/// Outcome of one recognition request.
#[derive(Clone, Debug)]
pub struct Recognition {
    pub tensor: CharacterTensor,
    /// The normalized image the tensor was built from.
    pub image: GrayImage,
    pub summary: PreprocessSummary,
    pub scores: Vec<f32>,
    pub top: Vec<Prediction>,
}

impl Recognition {
    pub fn best(&self) -> Option<&Prediction> {
        self.top.first()
    }
}

/// Stateless request handler holding the immutable configuration, the
/// label table and a shared model handle.
#[derive(Clone)]
pub struct Recognizer {
    config: PipelineConfig,
    labels: LabelTable,
    model: Arc<ModelHandle>,
}

impl Recognizer {
    /// Validate the configuration against the model and build the handler.
    pub fn new(config: PipelineConfig, model: Arc<ModelHandle>) -> Result<Self, SetupError> {
        config.validate()?;
        if let Ok(classifier) = model.classifier() {
            if let Some(size) = classifier.input_size() {
                if size != config.target_size {
                    return Err(SetupError::InputSizeMismatch {
                        model: size,
                        pipeline: config.target_size,
                    });
                }
            }
        }
        Ok(Self {
            config,
            labels: LabelTable::baybayin(),
            model,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Preprocess `raster`, classify it and return the `top_k` predictions.
    ///
    /// Model availability is checked before any preprocessing work.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, raster), fields(width = raster.width, height = raster.height))
    )]
    pub fn recognize(&self, raster: &Raster, top_k: usize) -> Result<Recognition, RecognizeError> {
        let classifier = self.model.classifier()?;

        let processed = preprocess_detailed(raster, &self.config).map_err(|err| {
            log::warn!("preprocessing failed: {}", err);
            RecognizeError::from(err)
        })?;

        let scores = classifier.predict(&processed.tensor)?;
        if scores.len() != NUM_CLASSES {
            return Err(ClassifierError::OutputShape {
                expected: NUM_CLASSES,
                got: scores.len(),
            }
            .into());
        }

        let top = rank(&scores, &self.labels, top_k);
        if let Some(best) = top.first() {
            log::info!(
                "recognized '{}' ({:.2}%)",
                best.label,
                best.confidence_percent()
            );
        }

        Ok(Recognition {
            tensor: processed.tensor,
            image: processed.image,
            summary: processed.summary,
            scores,
            top,
        })
    }
}
