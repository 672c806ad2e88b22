//! Asthma Guard Dashboard Server
//!
//! Receives readings from the ESP8266 sensor node, scores them against the
//! patient profile, and serves the dashboard views as JSON.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ASTHMA GUARD SERVER                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────────┐  ┌─────────────────────┐ │
//! │  │  Sensor   │  │  Risk Scorer  │  │  Dashboard Views    │ │
//! │  │  Ingest   │─▶│  (classifier) │  │  (profile, logs)    │ │
//! │  │  (Axum)   │  │               │  │                     │ │
//! │  └─────┬─────┘  └───────────────┘  └──────────┬──────────┘ │
//! │        └─────────────────┬────────────────────┘            │
//! │                          ▼                                  │
//! │              ┌───────────────────────┐                     │
//! │              │  JSON documents       │                     │
//! │              └───────────────────────┘                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod handlers;
mod error;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asthma_guard_core::{load_model, JsonStore, RiskScorer};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "asthma_guard_server=debug,asthma_guard_core=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Asthma Guard server starting...");
    tracing::info!("Data directory: {}", config.data_dir.display());

    // Model + schema are loaded once; a failure leaves scoring degraded
    let scorer = RiskScorer::new(load_model(&config.model));
    if !scorer.is_ready() {
        tracing::warn!("No usable model or feature schema, every reading will be scored UNKNOWN");
    }

    // Build application state
    let state = AppState {
        store: Arc::new(JsonStore::open(config.data_dir.clone())),
        scorer: Arc::new(scorer),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub scorer: Arc<RiskScorer>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Device API
    let api_routes = Router::new()
        .route("/api/sensor", post(handlers::sensor::ingest))
        .route("/predict", post(handlers::sensor::predict));

    // Dashboard views
    let view_routes = Router::new()
        .route("/", get(handlers::dashboard::overview))
        .route("/dashboard", get(handlers::dashboard::overview))
        .route("/alerts", get(handlers::dashboard::alerts))
        .route("/attack_history", get(handlers::dashboard::attack_history))
        .route("/graphs", get(handlers::dashboard::graphs))

        // Patient profile
        .route("/patient_profile", get(handlers::profile::get))
        .route("/update_profile", get(handlers::profile::get).post(handlers::profile::update));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(api_routes)
        .merge(view_routes)
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
