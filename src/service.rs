//! Prediction pipeline
//!
//! body → `PredictionRequest` → `FeatureVector` → classifier → `PredictionResponse`

use std::sync::Arc;

use crate::classifier::Classifier;
use crate::error::PredictionResult;
use crate::models::{FeatureVector, PredictionRequest, PredictionResponse};

#[derive(Clone)]
pub struct PredictionService {
    classifier: Arc<dyn Classifier>,
}

impl PredictionService {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Run the full pipeline on a raw request body. Blocks on inference.
    pub fn handle(&self, body: &[u8]) -> PredictionResult<PredictionResponse> {
        let request = PredictionRequest::from_body(body)?;
        tracing::debug!(age = request.age, salary = request.salary, "Prediction request");

        let features = FeatureVector::from_request(&request)?;
        tracing::debug!(features = %features.to_log_entry(), "Built feature vector");

        let label = self.classifier.predict(&features)?;
        tracing::debug!(class = label.class(), "Model prediction");

        Ok(label.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{FixedClassifier, ModelError};
    use crate::error::PredictionError;
    use crate::models::{Label, SalaryBucket};
    use parking_lot::Mutex;

    /// Records every row it is asked to classify
    struct RecordingClassifier {
        seen: Mutex<Vec<FeatureVector>>,
    }

    impl Classifier for RecordingClassifier {
        fn predict(&self, features: &FeatureVector) -> Result<Label, ModelError> {
            self.seen.lock().push(*features);
            Ok(Label::WillPurchase)
        }

        fn describe(&self) -> String {
            "recording".to_string()
        }
    }

    struct BrokenClassifier;

    impl Classifier for BrokenClassifier {
        fn predict(&self, _features: &FeatureVector) -> Result<Label, ModelError> {
            Err(ModelError::UnexpectedClass(7))
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    fn service(classifier: impl Classifier + 'static) -> PredictionService {
        PredictionService::new(Arc::new(classifier))
    }

    #[test]
    fn test_purchase_and_no_purchase() {
        let body = br#"{"age": 30, "salary": 87000}"#;

        let yes = service(FixedClassifier::always_purchase()).handle(body).unwrap();
        assert_eq!(yes.prediction, "Most likely will Purchase");

        let no = service(FixedClassifier::never_purchase()).handle(body).unwrap();
        assert_eq!(no.prediction, "Most likely will not Purchase");
    }

    #[test]
    fn test_model_receives_one_hot_row() {
        let recorder = Arc::new(RecordingClassifier { seen: Mutex::new(Vec::new()) });
        let svc = PredictionService::new(recorder.clone());

        svc.handle(br#"{"age": 52, "salary": "115125"}"#).unwrap();
        svc.handle(br#"{"age": 19, "salary": 15000}"#).unwrap();

        let seen = recorder.seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].age, 52);
        assert_eq!(seen[0].bucket().map(SalaryBucket::index), Some(6));
        assert_eq!(seen[1].age, 19);
        assert_eq!(seen[1].bucket().map(SalaryBucket::index), Some(0));
    }

    #[test]
    fn test_rejections_never_reach_model() {
        let recorder = Arc::new(RecordingClassifier { seen: Mutex::new(Vec::new()) });
        let svc = PredictionService::new(recorder.clone());

        assert_eq!(svc.handle(br#"{"age": 30, "salary": 200000}"#), Err(PredictionError::OutOfRange));
        assert_eq!(svc.handle(br#"{"age": 30}"#), Err(PredictionError::MissingField));
        assert_eq!(svc.handle(b"not json").unwrap_err().kind(), "parse");
        assert!(recorder.seen.lock().is_empty());
    }

    #[test]
    fn test_model_failure_is_unknown() {
        let err = service(BrokenClassifier).handle(br#"{"age": 30, "salary": 50000}"#).unwrap_err();
        assert_eq!(err.kind(), "unknown");
        assert!(err.to_string().contains("unexpected class 7"));
    }

    #[test]
    fn test_identical_bodies_identical_results() {
        let svc = service(FixedClassifier::always_purchase());
        let body = br#"{"age": 44, "salary": 64000.25}"#;
        let first = svc.handle(body);
        for _ in 0..5 {
            assert_eq!(svc.handle(body), first);
        }
    }
}
