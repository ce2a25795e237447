//! Prediction handler

use axum::{body::Bytes, extract::State, Json};

use crate::AppState;
use crate::error::PredictionResult;
use crate::models::PredictionResponse;

/// POST /api/predict
///
/// The body is taken as raw bytes so a missing or wrong `Content-Type` does
/// not turn into a framework rejection; every failure comes back as a 400
/// with an `error` field.
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> PredictionResult<Json<PredictionResponse>> {
    let service = state.service.clone();

    let response = tokio::task::spawn_blocking(move || service.handle(&body)).await??;

    tracing::info!("Prediction: {}", response.prediction);

    Ok(Json(response))
}
