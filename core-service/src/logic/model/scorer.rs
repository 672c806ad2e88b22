//! Risk Scorer
//!
//! Reading + profile -> feature vector -> classifier probability -> label.
//!
//! Scoring never fails from the caller's point of view: a missing model, an
//! empty schema or a classifier error all yield `{ probability: None,
//! label: UNKNOWN }`. `try_score` keeps the reason for callers that want it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::classifier::{Classifier, ClassifierError};
use super::threshold::{RiskLabel, RiskThresholds};
use crate::logic::features::{FeatureMap, FeatureSchema, LayoutInfo};
use crate::logic::patient::PatientProfile;
use crate::logic::reading::SensorReading;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Scoring result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub probability: Option<f64>,
    pub label: RiskLabel,
}

impl RiskAssessment {
    pub fn unknown() -> Self {
        Self { probability: None, label: RiskLabel::Unknown }
    }

    /// High risk with an actual probability behind it
    pub fn is_high_risk(&self) -> bool {
        self.probability.is_some() && self.label.is_high()
    }
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("feature schema is empty")]
    EmptySchema,

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error("classifier returned probability outside [0, 1]: {0}")]
    InvalidProbability(f64),
}

/// Model + schema, loaded once at start-up
#[derive(Clone)]
pub enum ModelState {
    Ready {
        classifier: Arc<dyn Classifier>,
        schema: FeatureSchema,
    },
    Unavailable {
        reason: String,
    },
}

impl std::fmt::Debug for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelState::Ready { classifier, schema } => f.debug_struct("Ready")
                .field("classifier", &classifier.name())
                .field("schema", &schema.names())
                .finish(),
            ModelState::Unavailable { reason } => f.debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Model status for health views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub layout: Option<LayoutInfo>,
    pub unavailable_reason: Option<String>,
}

// ============================================================================
// SCORING
// ============================================================================

/// Score with an explicit schema and optional classifier
pub fn score(
    sensor: &SensorReading,
    patient: Option<&PatientProfile>,
    schema: &FeatureSchema,
    classifier: Option<&dyn Classifier>,
) -> RiskAssessment {
    let Some(classifier) = classifier else {
        return RiskAssessment::unknown();
    };

    match try_score(sensor, patient, schema, classifier, &RiskThresholds::default()) {
        Ok(assessment) => assessment,
        Err(ScoreError::EmptySchema) => RiskAssessment::unknown(),
        Err(e) => {
            log::warn!("Scoring with {} failed, reporting UNKNOWN: {}", classifier.name(), e);
            RiskAssessment::unknown()
        }
    }
}

/// Score, surfacing why no probability could be produced
pub fn try_score(
    sensor: &SensorReading,
    patient: Option<&PatientProfile>,
    schema: &FeatureSchema,
    classifier: &dyn Classifier,
    thresholds: &RiskThresholds,
) -> Result<RiskAssessment, ScoreError> {
    if schema.is_empty() {
        return Err(ScoreError::EmptySchema);
    }

    let default_patient;
    let patient = match patient {
        Some(p) => p,
        None => {
            default_patient = PatientProfile::default();
            &default_patient
        }
    };

    let map = FeatureMap::derive(sensor, patient);
    let vector = schema.vectorize(&map);

    if log::log_enabled!(log::Level::Trace) {
        log::trace!("Feature vector: {}", vector.to_log_entry(schema.names()));
    }

    let probability = classifier.predict_probability(vector.as_slice())?;

    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(ScoreError::InvalidProbability(probability));
    }

    Ok(RiskAssessment {
        probability: Some(probability),
        label: thresholds.classify(probability),
    })
}

// ============================================================================
// RISK SCORER
// ============================================================================

/// Shared scorer over an immutable `ModelState`
#[derive(Debug, Clone)]
pub struct RiskScorer {
    state: ModelState,
    thresholds: RiskThresholds,
}

impl RiskScorer {
    pub fn new(state: ModelState) -> Self {
        Self { state, thresholds: RiskThresholds::default() }
    }

    pub fn ready(classifier: Arc<dyn Classifier>, schema: FeatureSchema) -> Self {
        Self::new(ModelState::Ready { classifier, schema })
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(ModelState::Unavailable { reason: reason.into() })
    }

    /// A model is loaded and its schema names at least one feature
    pub fn is_ready(&self) -> bool {
        matches!(&self.state, ModelState::Ready { schema, .. } if !schema.is_empty())
    }

    /// Score a reading; degrades to UNKNOWN, never fails
    pub fn score(&self, sensor: &SensorReading, patient: Option<&PatientProfile>) -> RiskAssessment {
        match self.try_score(sensor, patient) {
            Ok(assessment) => assessment,
            Err(ScoreError::ModelUnavailable(_)) | Err(ScoreError::EmptySchema) => {
                RiskAssessment::unknown()
            }
            Err(e) => {
                log::warn!("Scoring failed, reporting UNKNOWN: {}", e);
                RiskAssessment::unknown()
            }
        }
    }

    pub fn try_score(
        &self,
        sensor: &SensorReading,
        patient: Option<&PatientProfile>,
    ) -> Result<RiskAssessment, ScoreError> {
        match &self.state {
            ModelState::Ready { classifier, schema } => {
                try_score(sensor, patient, schema, classifier.as_ref(), &self.thresholds)
            }
            ModelState::Unavailable { reason } => Err(ScoreError::ModelUnavailable(reason.clone())),
        }
    }

    pub fn status(&self) -> ModelStatus {
        match &self.state {
            ModelState::Ready { classifier, schema } => ModelStatus {
                model_loaded: true,
                model_name: classifier.name().to_string(),
                layout: Some(schema.info()),
                unavailable_reason: schema.is_empty().then(|| ScoreError::EmptySchema.to_string()),
            },
            ModelState::Unavailable { reason } => ModelStatus {
                model_loaded: false,
                model_name: "None".to_string(),
                layout: None,
                unavailable_reason: Some(reason.clone()),
            },
        }
    }
}
