//! Model Loader - one-time initialization of classifier + schema
//!
//! Produces an immutable `ModelState`. Load failures never abort the
//! process: they become `ModelState::Unavailable` and scoring reports
//! UNKNOWN until the artifacts are fixed and the service restarted.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::classifier::{Classifier, ClassifierError};
use super::logistic::LogisticClassifier;
use super::onnx::OnnxClassifier;
use super::scorer::ModelState;
use crate::constants;
use crate::logic::features::{FeatureSchema, SchemaError};

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("model checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Where the model artifacts live
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model_path: PathBuf,
    pub features_path: PathBuf,
    /// Hex SHA-256 the model file must match, if set
    pub expected_sha256: Option<String>,
}

impl ModelConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_path: constants::get_model_path(),
            features_path: constants::get_features_path(),
            expected_sha256: constants::get_model_sha256(),
        }
    }

    /// Default artifact names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model_path: dir.join(constants::DEFAULT_MODEL_FILE),
            features_path: dir.join(constants::DEFAULT_FEATURES_FILE),
            expected_sha256: None,
        }
    }
}

/// Load classifier and schema, surfacing the first failure
pub fn try_load_model(config: &ModelConfig) -> Result<(Arc<dyn Classifier>, FeatureSchema), ModelLoadError> {
    if !config.model_path.exists() {
        return Err(ModelLoadError::NotFound(config.model_path.clone()));
    }

    if let Some(expected) = &config.expected_sha256 {
        let actual = compute_file_hash(&config.model_path)?;
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(ModelLoadError::ChecksumMismatch {
                expected: expected.clone(),
                actual,
            });
        }
        log::info!("Model checksum verified ({})", actual);
    }

    let schema = FeatureSchema::load(&config.features_path)?;

    let extension = config.model_path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let classifier: Arc<dyn Classifier> = match extension.as_str() {
        "onnx" => Arc::new(OnnxClassifier::from_file(&config.model_path)?),
        "json" => Arc::new(LogisticClassifier::from_file(&config.model_path)?),
        other => return Err(ModelLoadError::UnsupportedFormat(format!(
            "'{}' ({})", other, config.model_path.display()
        ))),
    };

    Ok((classifier, schema))
}

/// Load classifier and schema; failures become `ModelState::Unavailable`
pub fn load_model(config: &ModelConfig) -> ModelState {
    match try_load_model(config) {
        Ok((classifier, schema)) => {
            log::info!(
                "Loaded model {} with {} features (layout {:08x})",
                classifier.name(),
                schema.len(),
                schema.layout_hash()
            );
            if schema.is_empty() {
                log::warn!("Feature schema {} is empty, scores will be UNKNOWN", config.features_path.display());
            }
            ModelState::Ready { classifier, schema }
        }
        Err(e) => {
            log::warn!("Could not load model, risk scores will be UNKNOWN: {}", e);
            ModelState::Unavailable { reason: e.to_string() }
        }
    }
}

/// Compute SHA256 hash of file
pub fn compute_file_hash(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_logistic(dir: &Path) -> ModelConfig {
        let model_path = dir.join("risk_model.json");
        let features_path = dir.join("features_future.json");
        std::fs::write(&model_path, r#"{"coefficients": [0.1, 0.02], "intercept": -3.0}"#).unwrap();
        std::fs::write(&features_path, r#"["dust", "age"]"#).unwrap();

        ModelConfig { model_path, features_path, expected_sha256: None }
    }

    #[test]
    fn test_missing_model_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_model(&ModelConfig::in_dir(dir.path()));

        match state {
            ModelState::Unavailable { reason } => assert!(reason.contains("model not found")),
            other => panic!("Expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_load_logistic_model() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_logistic(dir.path());

        let (classifier, schema) = try_load_model(&config).unwrap();
        assert_eq!(schema.names(), &["dust".to_string(), "age".to_string()]);
        assert_eq!(classifier.name(), "logistic:risk_model.json");
    }

    #[test]
    fn test_missing_schema_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_logistic(dir.path());
        config.features_path = dir.path().join("missing.json");

        assert!(matches!(try_load_model(&config), Err(ModelLoadError::Schema(_))));
    }

    #[test]
    fn test_checksum_verification() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_logistic(dir.path());

        let actual = compute_file_hash(&config.model_path).unwrap();
        assert_eq!(actual.len(), 64);

        config.expected_sha256 = Some(actual.to_uppercase());
        assert!(try_load_model(&config).is_ok());

        config.expected_sha256 = Some("00".repeat(32));
        assert!(matches!(
            try_load_model(&config),
            Err(ModelLoadError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_logistic(dir.path());
        let pkl = dir.path().join("xgb_future.pkl");
        std::fs::write(&pkl, b"not a model").unwrap();
        config.model_path = pkl;

        assert!(matches!(
            try_load_model(&config),
            Err(ModelLoadError::UnsupportedFormat(_))
        ));
    }
}
