//! Classifier contract.

use baybayin_preprocess::CharacterTensor;

/// Errors raised by classifier backends.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("classifier initialization failed: {0}")]
    Init(String),
    #[error("model file not found: {0}")]
    ModelNotFound(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("classifier returned {got} scores, expected {expected}")]
    OutputShape { expected: usize, got: usize },
}

/// Opaque character classifier: a `[1, H, W, 1]` tensor in, one score per class out.
///
/// Scores are treated as rankable confidences; they need not sum to 1.
/// Implementations must be shareable across threads once initialized.
pub trait Classifier: Send + Sync {
    fn predict(&self, input: &CharacterTensor) -> Result<Vec<f32>, ClassifierError>;

    /// Expected input `[width, height]`, when the backend knows it.
    fn input_size(&self) -> Option<[usize; 2]> {
        None
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, input: &CharacterTensor) -> Result<Vec<f32>, ClassifierError> {
        (**self).predict(input)
    }

    fn input_size(&self) -> Option<[usize; 2]> {
        (**self).input_size()
    }
}
