//! Asthma Guard Core
//!
//! Asthma attack risk scoring from environmental sensor readings and a
//! patient profile, plus the flat-file document store and dashboard views
//! the HTTP server exposes.
//!
//! ```text
//! SensorPayload ──resolve──▶ SensorReading ─┐
//!                                           ├─▶ FeatureMap ─schema─▶ FeatureVector
//! PatientProfile ───────────────────────────┘                           │
//!                                                                       ▼
//!                                   RiskAssessment ◀─thresholds─ Classifier
//! ```

pub mod constants;
pub mod logic;

pub use logic::features::{FeatureMap, FeatureName, FeatureSchema, FeatureVector};
pub use logic::model::{
    load_model, score, Classifier, ClassifierError, ModelConfig, ModelState, ModelStatus,
    RiskAssessment, RiskLabel, RiskScorer, RiskThresholds, ScoreError,
};
pub use logic::patient::{PatientProfile, ProfileUpdate};
pub use logic::reading::{SensorPayload, SensorReading};
pub use logic::storage::{Document, JsonStore, StorageError};
