//! ONNX Runtime backend.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::TensorRef;

use baybayin_preprocess::CharacterTensor;

use crate::classifier::{Classifier, ClassifierError};

/// Classifier backed by an exported ONNX model taking `[1, H, W, 1]` f32 input.
///
/// `Session::run` needs `&mut self`, so the session sits behind a mutex and
/// concurrent requests take turns on it.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    input_size: Option<[usize; 2]>,
}

impl OnnxClassifier {
    /// Load the model at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ClassifierError::ModelNotFound(path.display().to_string()));
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| ClassifierError::Init(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e: ort::Error| ClassifierError::Init(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e: ort::Error| ClassifierError::Init(format!("ONNX load failed: {e}")))?;

        log::info!("ONNX classifier loaded from {}", path.display());

        Ok(Self {
            session: Mutex::new(session),
            input_size: None,
        })
    }

    /// Declare the `[width, height]` the model was trained on so a mismatched
    /// pipeline configuration is rejected at startup.
    pub fn with_input_size(mut self, size: [usize; 2]) -> Self {
        self.input_size = Some(size);
        self
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, input: &CharacterTensor) -> Result<Vec<f32>, ClassifierError> {
        let tensor = TensorRef::from_array_view(input.as_array())
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifierError::Inference("session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| ClassifierError::Inference(format!("ONNX inference failed: {e}")))?;

        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("output extraction: {e}")))?;

        // Accept `[classes]` or `[1, classes]`.
        let batch = if shape.len() == 2 { shape[0] } else { 1 };
        if shape.len() > 2 || batch != 1 {
            return Err(ClassifierError::Inference(format!(
                "unexpected output shape {shape:?}"
            )));
        }

        Ok(data.to_vec())
    }

    fn input_size(&self) -> Option<[usize; 2]> {
        self.input_size
    }
}
