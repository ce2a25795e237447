//! ONNX Runtime classifier
//!
//! Expects an ONNX export of the trained classifier with a single float
//! input of shape `[N, 9]` and the predicted class as its first output.

use std::path::Path;

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use crate::models::{FeatureVector, Label, FEATURE_COUNT};
use super::{Classifier, ModelError};

pub struct OnnxClassifier {
    // `Session::run` needs `&mut`, one inference at a time
    session: Mutex<Session>,
    output_name: String,
    model_path: String,
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn load(model_path: &str) -> Result<Self, ModelError> {
        tracing::info!("Loading ONNX model from: {}", model_path);

        if !Path::new(model_path).exists() {
            return Err(ModelError::NotFound(model_path.to_string()));
        }

        let environment = ort::init().build()
            .map_err(|e| ModelError::Load(format!("environment: {}", e)))?;

        let session = Session::builder(&environment)
            .map_err(|e| ModelError::Load(format!("session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Load(format!("optimization level: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ModelError::Load(e.to_string()))?;

        Self::from_session(session, model_path)
    }

    /// Load ONNX model from bytes
    pub fn load_from_bytes(model_bytes: &[u8]) -> Result<Self, ModelError> {
        tracing::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let environment = ort::init().build()
            .map_err(|e| ModelError::Load(format!("environment: {}", e)))?;

        let session = Session::builder(&environment)
            .map_err(|e| ModelError::Load(format!("session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Load(format!("optimization level: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| ModelError::Load(e.to_string()))?;

        Self::from_session(session, "<memory>")
    }

    fn from_session(session: Session, model_path: &str) -> Result<Self, ModelError> {
        if session.inputs().len() != 1 {
            return Err(ModelError::Load(format!(
                "expected a single input, model declares {}",
                session.inputs().len()
            )));
        }

        let output_name = session.outputs().first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| ModelError::Load("model declares no outputs".to_string()))?;

        tracing::info!("ONNX model loaded, reading class from output '{}'", output_name);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            model_path: model_path.to_string(),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Label, ModelError> {
        let start_time = std::time::Instant::now();

        let input_array = Array2::<f32>::from_shape_vec(
            (1, FEATURE_COUNT),
            features.to_row().to_vec(),
        ).map_err(|e| ModelError::Inference(format!("array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ModelError::Inference(format!("tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let output = outputs.get(&self.output_name)
            .ok_or_else(|| ModelError::Inference(format!("missing output '{}'", self.output_name)))?;

        // skl2onnx exports labels as int64; some converters emit float
        let class = match output.try_extract_tensor::<i64>() {
            Ok((_, data)) => data.first().copied(),
            Err(_) => output.try_extract_tensor::<f32>()
                .map_err(|e| ModelError::Inference(format!("extract error: {}", e)))?
                .1
                .first()
                .map(|v| v.round() as i64),
        }
        .ok_or_else(|| ModelError::Inference("empty output tensor".to_string()))?;

        tracing::debug!(
            class,
            elapsed_us = start_time.elapsed().as_micros() as u64,
            "ONNX inference complete"
        );

        Label::from_class(class).ok_or(ModelError::UnexpectedClass(class))
    }

    fn describe(&self) -> String {
        format!("onnx:{}", self.model_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file() {
        let err = OnnxClassifier::load("definitely/not/here.onnx").err().unwrap();
        assert!(matches!(err, ModelError::NotFound(_)));
        assert!(err.to_string().contains("definitely/not/here.onnx"));
    }
}
