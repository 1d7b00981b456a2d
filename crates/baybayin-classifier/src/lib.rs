//! Classification side of Baybayin character recognition.
//!
//! - [`BAYBAYIN_LABELS`]: the 59 classes in classifier output order.
//! - [`Classifier`]: the opaque model contract (tensor in, scores out).
//! - [`rank`]: stable top-k selection with labels attached.
//! - [`ModelHandle`] / [`Recognizer`]: load-once model plus the per-request
//!   flow (availability check, preprocessing, prediction, ranking).
//!
//! With the `onnx` feature, [`OnnxClassifier`] runs an exported model through
//! ONNX Runtime.

mod classifier;
mod labels;
#[cfg(feature = "onnx")]
mod onnx;
mod ranking;
mod recognizer;

pub use classifier::{Classifier, ClassifierError};
pub use labels::{LabelTable, BAYBAYIN_LABELS, NUM_CLASSES};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
pub use ranking::{rank, top_k_indices, Prediction};
pub use recognizer::{
    ModelHandle, RecognizeError, Recognition, Recognizer, SetupError, DEFAULT_TOP_K,
};
