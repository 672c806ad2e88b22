//! Sensor ingest - the path every device post takes
//!
//! Store the reading, score it against the saved profile, and log an attack
//! plus an alert when the result is high risk.

use serde::{Deserialize, Serialize};

use crate::logic::model::{RiskAssessment, RiskLabel, RiskScorer};
use crate::logic::patient::PatientProfile;
use crate::logic::reading::SensorPayload;
use crate::logic::storage::{AlertRecord, AttackRecord, Document, JsonStore, ReadingRecord, StorageError};

/// Response body of the ingest endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestOutcome {
    pub status: String,
    pub timestamp: String,
    pub probability: Option<f64>,
    pub label: RiskLabel,
}

/// Persist a device reading and score it
pub fn ingest_reading(
    store: &JsonStore,
    scorer: &RiskScorer,
    payload: &SensorPayload,
    timestamp: String,
) -> Result<IngestOutcome, StorageError> {
    let record = ReadingRecord::from_payload(payload, timestamp);
    store.append(Document::Readings, &record)?;

    let patient: PatientProfile = store.load_or_default(Document::Patient);
    let assessment = scorer.score(&record.sensor(), Some(&patient));

    if assessment.is_high_risk() {
        log_high_risk(store, &record, &assessment);
    }

    Ok(IngestOutcome {
        status: "ok".to_string(),
        timestamp: record.timestamp,
        probability: assessment.probability,
        label: assessment.label,
    })
}

/// Record the alert and the attack independently; a damaged log never
/// suppresses the other one or the device's response.
fn log_high_risk(store: &JsonStore, record: &ReadingRecord, assessment: &RiskAssessment) {
    log::warn!(
        "High asthma risk at {} (p = {:.3}): {}",
        record.timestamp,
        assessment.probability.unwrap_or_default(),
        record.details()
    );

    if let Err(e) = store.append(Document::Alerts, &AlertRecord::high_risk(record)) {
        log::error!("Failed to record high-risk alert: {}", e);
    }

    if let Some(attack) = AttackRecord::new(record, assessment) {
        if let Err(e) = store.append(Document::Attacks, &attack) {
            log::error!("Failed to record attack: {}", e);
        }
    }
}

/// Score a payload against the saved profile without storing anything
pub fn predict_once(store: &JsonStore, scorer: &RiskScorer, payload: &SensorPayload) -> RiskAssessment {
    let record = ReadingRecord::from_payload(payload, String::new());
    let patient: PatientProfile = store.load_or_default(Document::Patient);
    scorer.score(&record.sensor(), Some(&patient))
}
