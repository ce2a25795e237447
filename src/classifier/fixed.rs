//! Classifier that always answers with the same label.
//! Stands in for the real model in tests and local smoke runs.

use crate::models::{FeatureVector, Label};
use super::{Classifier, ModelError};

#[derive(Debug, Clone, Copy)]
pub struct FixedClassifier {
    label: Label,
}

impl FixedClassifier {
    pub fn new(label: Label) -> Self {
        Self { label }
    }

    pub fn always_purchase() -> Self {
        Self::new(Label::WillPurchase)
    }

    pub fn never_purchase() -> Self {
        Self::new(Label::WillNotPurchase)
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, _features: &FeatureVector) -> Result<Label, ModelError> {
        Ok(self.label)
    }

    fn describe(&self) -> String {
        format!("fixed:{}", self.label.class())
    }
}
