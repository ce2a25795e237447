//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::classifier::ModelError;

pub type PredictionResult<T> = Result<T, PredictionError>;

/// Everything that can go wrong between receiving a body and answering it.
///
/// Every variant is reported to the caller as `400 Bad Request`; the variants
/// only differ in how they are logged.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PredictionError {
    /// Body is not JSON, or not a JSON object
    #[error("{0}")]
    Parse(String),

    #[error("Missing 'Age' or 'Salary")]
    MissingField,

    /// `age` or `salary` could not be turned into a number
    #[error("{0}")]
    Coercion(String),

    #[error("Salary is outside the expected range")]
    OutOfRange,

    #[error("Failed to set salary bucket column '{0}'")]
    FeatureAssignment(String),

    /// Catch-all, mostly model failures
    #[error("{0}")]
    Unknown(String),
}

impl PredictionError {
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::Parse(_) => "parse",
            PredictionError::MissingField => "missing_field",
            PredictionError::Coercion(_) => "coercion",
            PredictionError::OutOfRange => "out_of_range",
            PredictionError::FeatureAssignment(_) => "feature_assignment",
            PredictionError::Unknown(_) => "unknown",
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        match &self {
            PredictionError::FeatureAssignment(_) | PredictionError::Unknown(_) => {
                tracing::error!(kind = self.kind(), "Prediction failed: {}", self);
            }
            _ => {
                tracing::warn!(kind = self.kind(), "Rejected prediction request: {}", self);
            }
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

impl From<serde_json::Error> for PredictionError {
    fn from(err: serde_json::Error) -> Self {
        PredictionError::Parse(format!("Invalid JSON body: {}", err))
    }
}

impl From<ModelError> for PredictionError {
    fn from(err: ModelError) -> Self {
        PredictionError::Unknown(err.to_string())
    }
}

impl From<tokio::task::JoinError> for PredictionError {
    fn from(err: tokio::task::JoinError) -> Self {
        PredictionError::Unknown(format!("Prediction task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_messages() {
        assert_eq!(PredictionError::MissingField.to_string(), "Missing 'Age' or 'Salary");
        assert_eq!(
            PredictionError::OutOfRange.to_string(),
            "Salary is outside the expected range"
        );
    }

    #[test]
    fn test_every_kind_is_bad_request() {
        let errors = [
            PredictionError::Parse("x".into()),
            PredictionError::MissingField,
            PredictionError::Coercion("x".into()),
            PredictionError::OutOfRange,
            PredictionError::FeatureAssignment("3.0".into()),
            PredictionError::Unknown("x".into()),
        ];
        for err in errors {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_model_error_becomes_unknown() {
        let err: PredictionError = ModelError::Inference("session exploded".into()).into();
        assert_eq!(err.kind(), "unknown");
        assert!(err.to_string().contains("session exploded"));
    }
}
