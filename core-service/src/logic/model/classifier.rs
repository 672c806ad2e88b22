//! Classifier capability
//!
//! The pre-trained model is opaque: all the scorer needs from it is the
//! probability of the positive (high risk) class for one feature vector.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("expected {expected} features, got {actual}")]
    InputLength { expected: usize, actual: usize },

    #[error("inference failed: {0}")]
    Runtime(String),

    #[error("unexpected model output: {0}")]
    InvalidOutput(String),
}

/// Trait for probability models (ONNX, logistic, ...)
///
/// Implementations must be safe to share between threads; the scorer calls
/// them concurrently without locking.
pub trait Classifier: Send + Sync {
    /// Probability of the high-risk class, in `[0, 1]`
    fn predict_probability(&self, features: &[f64]) -> Result<f64, ClassifierError>;

    /// Short description for status views and logs
    fn name(&self) -> &str;
}
