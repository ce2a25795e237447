//! Purchase Predictor server binary

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use purchase_predictor::{
    classifier::OnnxClassifier,
    config::Config,
    create_router, AppState, PredictionService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging, JSON lines in production
    let json_logs = config.is_production();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "purchase_predictor=debug,tower_http=debug".into()))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Purchase Predictor starting ({})...", config.environment);

    // Load the model once; it is shared read-only by every request
    let classifier = OnnxClassifier::load(&config.model_path)
        .with_context(|| format!("Failed to load model from {}", config.model_path))?;

    let state = AppState {
        service: PredictionService::new(Arc::new(classifier)),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
