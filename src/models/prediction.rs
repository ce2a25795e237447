//! Prediction output model

use serde::{Deserialize, Serialize};

/// Binary class produced by the purchase classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    WillPurchase,
    WillNotPurchase,
}

impl Label {
    /// Map a raw model class (1 or 0) to a label
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            1 => Some(Self::WillPurchase),
            0 => Some(Self::WillNotPurchase),
            _ => None,
        }
    }

    pub fn class(&self) -> i64 {
        match self {
            Self::WillPurchase => 1,
            Self::WillNotPurchase => 0,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::WillPurchase => "Most likely will Purchase",
            Self::WillNotPurchase => "Most likely will not Purchase",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
}

impl From<Label> for PredictionResponse {
    fn from(label: Label) -> Self {
        Self {
            prediction: label.message().to_string(),
        }
    }
}
