//! Risk Thresholds
//!
//! Maps the classifier's high-risk probability onto a three-tier label.
//! Lower bounds are inclusive: exactly 0.35 is MEDIUM, exactly 0.65 is HIGH.

use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};

/// Risk label shown on the dashboard and stored in the attack log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "LOW RISK")]
    Low,
    #[serde(rename = "MEDIUM RISK")]
    Medium,
    #[serde(rename = "HIGH RISK")]
    High,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "LOW RISK",
            RiskLabel::Medium => "MEDIUM RISK",
            RiskLabel::High => "HIGH RISK",
            RiskLabel::Unknown => "UNKNOWN",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, RiskLabel::High)
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Lowest probability labelled MEDIUM RISK
    pub medium: f64,

    /// Lowest probability labelled HIGH RISK
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: MEDIUM_RISK_THRESHOLD,
            high: HIGH_RISK_THRESHOLD,
        }
    }
}

impl RiskThresholds {
    pub fn classify(&self, probability: f64) -> RiskLabel {
        if probability < self.medium {
            RiskLabel::Low
        } else if probability < self.high {
            RiskLabel::Medium
        } else {
            RiskLabel::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let t = RiskThresholds::default();
        assert_eq!(t.classify(0.34999), RiskLabel::Low);
        assert_eq!(t.classify(0.35), RiskLabel::Medium);
        assert_eq!(t.classify(0.64999), RiskLabel::Medium);
        assert_eq!(t.classify(0.65), RiskLabel::High);
    }

    #[test]
    fn test_extremes() {
        let t = RiskThresholds::default();
        assert_eq!(t.classify(0.0), RiskLabel::Low);
        assert_eq!(t.classify(1.0), RiskLabel::High);
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(serde_json::to_string(&RiskLabel::High).unwrap(), "\"HIGH RISK\"");
        assert_eq!(serde_json::to_string(&RiskLabel::Unknown).unwrap(), "\"UNKNOWN\"");
        let parsed: RiskLabel = serde_json::from_str("\"MEDIUM RISK\"").unwrap();
        assert_eq!(parsed, RiskLabel::Medium);
        assert_eq!(RiskLabel::Low.to_string(), "LOW RISK");
    }
}
