//! Model Module - Classifier and risk scoring
//!
//! Classifier adapters sit behind the `Classifier` trait so the scorer never
//! knows which model format is loaded.

pub mod classifier;
pub mod loader;
pub mod logistic;
pub mod onnx;
pub mod scorer;
pub mod threshold;

// Re-export common types
pub use classifier::{Classifier, ClassifierError};
pub use loader::{load_model, try_load_model, ModelConfig, ModelLoadError};
pub use logistic::{LogisticClassifier, LogisticModel};
pub use onnx::OnnxClassifier;
pub use scorer::{score, try_score, ModelState, ModelStatus, RiskAssessment, RiskScorer, ScoreError};
pub use threshold::{RiskLabel, RiskThresholds};
