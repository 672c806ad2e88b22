//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Runtime overrides come from environment variables (see helpers below).

use std::path::PathBuf;

/// Probability at or above which a reading is MEDIUM RISK
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.35;

/// Probability at or above which a reading is HIGH RISK
pub const HIGH_RISK_THRESHOLD: f64 = 0.65;

/// Default model artifact file name (inside the data directory)
pub const DEFAULT_MODEL_FILE: &str = "xgb_future.onnx";

/// Default feature schema file name (inside the data directory)
pub const DEFAULT_FEATURES_FILE: &str = "features_future.json";

/// Number of readings kept by the graphs view
pub const DEFAULT_GRAPH_WINDOW: usize = 300;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Message stored with every high risk alert
pub const HIGH_RISK_ALERT_MESSAGE: &str = "HIGH Immediate Asthma Risk Detected!";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Asthma Guard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Directory holding the JSON documents and model artifacts
pub fn get_data_dir() -> PathBuf {
    std::env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Model artifact path from environment or `<data dir>/xgb_future.onnx`
pub fn get_model_path() -> PathBuf {
    std::env::var("MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| get_data_dir().join(DEFAULT_MODEL_FILE))
}

/// Feature schema path from environment or `<data dir>/features_future.json`
pub fn get_features_path() -> PathBuf {
    std::env::var("FEATURES_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| get_data_dir().join(DEFAULT_FEATURES_FILE))
}

/// Expected SHA-256 of the model artifact, if verification is wanted
pub fn get_model_sha256() -> Option<String> {
    std::env::var("MODEL_SHA256")
        .ok()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

/// Graph window from environment or default
pub fn get_graph_window() -> usize {
    std::env::var("GRAPH_WINDOW")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|n: &usize| *n > 0)
        .unwrap_or(DEFAULT_GRAPH_WINDOW)
}
