//! Configuration module

use std::env;
use std::path::PathBuf;

use asthma_guard_core::constants;
use asthma_guard_core::ModelConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Directory holding patient/readings/attacks/alerts JSON documents
    pub data_dir: PathBuf,

    /// Model artifacts
    pub model: ModelConfig,

    /// Readings shown on the graphs view
    pub graph_window: usize,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(constants::DEFAULT_PORT),

            data_dir: constants::get_data_dir(),

            model: ModelConfig::from_env(),

            graph_window: constants::get_graph_window(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
