//! Purchase Predictor
//!
//! HTTP service answering "will this person buy?" for social media ads,
//! from a pre-trained classifier over age and salary bucket.
//!
//! # Architecture
//!
//! ```text
//! POST /api/predict
//!        │  raw JSON body
//!        ▼
//! ┌──────────────────┐   ┌────────────────┐   ┌──────────────────┐
//! │ PredictionRequest│──▶│ FeatureVector  │──▶│ Classifier       │
//! │ (age, salary)    │   │ Age + one-hot  │   │ (ONNX Runtime)   │
//! └──────────────────┘   └────────────────┘   └────────┬─────────┘
//!                                                      ▼
//!                                   {"prediction": "Most likely will ..."}
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod classifier;
pub mod service;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{PredictionError, PredictionResult};
pub use service::PredictionService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: PredictionService,
    pub config: config::Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/predict", post(handlers::predict::predict))
        // Trailing-slash form used by the web frontend
        .route("/api/predict/", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
