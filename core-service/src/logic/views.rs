//! Dashboard views
//!
//! Read-side projections over the stored documents. Rendering is left to
//! whoever consumes the JSON.

use serde::{Deserialize, Serialize};

use crate::logic::model::RiskScorer;
use crate::logic::patient::{PatientProfile, ProfileUpdate};
use crate::logic::storage::{
    parse_timestamp, AlertRecord, AttackRecord, Document, JsonStore, ReadingRecord, StorageError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub latest: Option<ReadingRecord>,
    /// Live assessment of the latest reading (not read from the attack log)
    pub latest_attack: Option<AttackRecord>,
    pub patient: PatientProfile,
}

/// Latest reading, its live risk assessment, and the profile
pub fn dashboard(store: &JsonStore, scorer: &RiskScorer) -> DashboardView {
    let latest = store.load_records::<ReadingRecord>(Document::Readings).pop();
    let patient: PatientProfile = store.load_or_default(Document::Patient);

    let latest_attack = latest.as_ref().and_then(|reading| {
        let assessment = scorer.score(&reading.sensor(), Some(&patient));
        AttackRecord::new(reading, &assessment)
    });

    DashboardView { latest, latest_attack, patient }
}

pub fn patient_profile(store: &JsonStore) -> PatientProfile {
    store.load_or_default(Document::Patient)
}

/// Merge a form submission into the stored profile and save it, holding
/// the store's write lock for the whole read-modify-write
pub fn update_profile(store: &JsonStore, update: ProfileUpdate) -> Result<PatientProfile, StorageError> {
    let patient = store.update(Document::Patient, PatientProfile::default(), |patient| {
        patient.apply(update);
    })?;

    log::info!("Patient profile updated (age {}, {})", patient.age, patient.smoker);
    Ok(patient)
}

/// Alert log in stored order
pub fn alerts(store: &JsonStore) -> Vec<AlertRecord> {
    store.load_records(Document::Alerts)
}

/// Attack log, newest first
pub fn attack_history(store: &JsonStore) -> Vec<AttackRecord> {
    let mut attacks: Vec<AttackRecord> = store.load_records(Document::Attacks);
    attacks.reverse();
    attacks
}

/// One point on the sensor graphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    #[serde(flatten)]
    pub reading: ReadingRecord,
    /// `HH:MM:SS`, or the raw timestamp when it does not parse
    pub time: String,
}

/// The most recent `window` readings, oldest first
pub fn graph_series(store: &JsonStore, window: usize) -> Vec<GraphPoint> {
    let readings: Vec<ReadingRecord> = store.load_records(Document::Readings);
    let skip = readings.len().saturating_sub(window);

    readings.into_iter()
        .skip(skip)
        .map(|reading| {
            let time = parse_timestamp(&reading.timestamp)
                .map(|dt| dt.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| reading.timestamp.clone());
            GraphPoint { reading, time }
        })
        .collect()
}
