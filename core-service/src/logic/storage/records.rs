//! Log records persisted by the ingest path

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::HIGH_RISK_ALERT_MESSAGE;
use crate::logic::model::{RiskAssessment, RiskLabel};
use crate::logic::reading::{SensorPayload, SensorReading};

/// Local time, second precision, ISO-8601 without offset
pub fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Parse a stored timestamp (with or without fractional seconds / offset)
pub fn parse_timestamp(ts: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(ts).ok().map(|dt| dt.naive_local()))
}

/// One stored sensor reading (`readings.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredReading")]
pub struct ReadingRecord {
    pub timestamp: String,
    pub temperature: f64,
    pub humidity: f64,
    pub mq2: i64,
    pub mq135: i64,
    pub dust_equiv: f64,
}

/// On-disk shape; older entries carry `dust`, some carry both keys
#[derive(Deserialize)]
struct StoredReading {
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    temperature: f64,
    #[serde(default)]
    humidity: f64,
    #[serde(default)]
    mq2: i64,
    #[serde(default)]
    mq135: i64,
    #[serde(default)]
    dust_equiv: Option<f64>,
    #[serde(default)]
    dust: Option<f64>,
}

impl From<StoredReading> for ReadingRecord {
    fn from(raw: StoredReading) -> Self {
        Self {
            timestamp: raw.timestamp,
            temperature: raw.temperature,
            humidity: raw.humidity,
            mq2: raw.mq2,
            mq135: raw.mq135,
            dust_equiv: raw.dust_equiv.or(raw.dust).unwrap_or(0.0),
        }
    }
}

/// Digital MQ outputs idle high, so a missing gas signal means "no gas"
const MQ_IDLE: f64 = 1.0;

impl ReadingRecord {
    /// Build the stored form of a device payload. Gas signals default to
    /// the idle level and are truncated to integers.
    pub fn from_payload(payload: &SensorPayload, timestamp: String) -> Self {
        Self {
            timestamp,
            temperature: payload.temperature.unwrap_or(0.0),
            humidity: payload.humidity.unwrap_or(0.0),
            mq2: payload.mq2.unwrap_or(MQ_IDLE).trunc() as i64,
            mq135: payload.mq135.unwrap_or(MQ_IDLE).trunc() as i64,
            dust_equiv: payload.dust_value().unwrap_or(0.0),
        }
    }

    pub fn sensor(&self) -> SensorReading {
        SensorReading::new(
            self.temperature,
            self.humidity,
            self.mq2 as f64,
            self.mq135 as f64,
            self.dust_equiv,
        )
    }

    /// `T=.., H=.., MQ2=.., MQ135=.., Dust=..` summary used in logs
    pub fn details(&self) -> String {
        format!(
            "T={:?}, H={:?}, MQ2={}, MQ135={}, Dust={:?}",
            self.temperature, self.humidity, self.mq2, self.mq135, self.dust_equiv
        )
    }
}

/// High risk event (`attacks.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRecord {
    pub timestamp: String,
    pub probability: f64,
    pub risk_label: RiskLabel,
    pub details: String,
}

impl AttackRecord {
    /// `None` unless the assessment carries a probability
    pub fn new(reading: &ReadingRecord, assessment: &RiskAssessment) -> Option<Self> {
        assessment.probability.map(|probability| Self {
            timestamp: reading.timestamp.clone(),
            probability,
            risk_label: assessment.label,
            details: reading.details(),
        })
    }
}

/// User-facing alert (`alerts.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub timestamp: String,
    pub message: String,
    pub details: String,
}

impl AlertRecord {
    pub fn high_risk(reading: &ReadingRecord) -> Self {
        Self {
            timestamp: reading.timestamp.clone(),
            message: HIGH_RISK_ALERT_MESSAGE.to_string(),
            details: reading.details(),
        }
    }
}
