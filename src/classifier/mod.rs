//! Classifier Module - purchase model inference
//!
//! The service only needs one capability from a model: turn a feature row
//! into a 0/1 class. Implementations are loaded once at startup and shared
//! read-only between requests.

pub mod onnx;
pub mod fixed;

pub use onnx::OnnxClassifier;
pub use fixed::FixedClassifier;

use crate::models::{FeatureVector, Label};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Failed to load model: {0}")]
    Load(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Model returned unexpected class {0}")]
    UnexpectedClass(i64),
}

/// Binary classifier over a single feature row
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Label, ModelError>;

    /// Short human-readable description for logs and the health route
    fn describe(&self) -> String;
}
