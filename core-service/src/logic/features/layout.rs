//! Feature Layout - Named features the scorer can derive
//!
//! The model's schema file decides which of these reach the classifier and
//! in what order. This file fixes the names and the order the model was
//! trained with, and the CRC32 layout hash used to tag vectors.
//!
//! ## Rules:
//! 1. A name here must match the training pipeline's column name exactly
//! 2. Never reuse a name for a different encoding

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE LAYOUT
// ============================================================================

/// Feature names in training order
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Sensor (0-4) ===
    "humidity",          // 0: relative humidity, %
    "temperature",       // 1: ambient temperature, °C
    "mq2",               // 2: MQ-2 gas sensor signal
    "mq135",             // 3: MQ-135 air quality signal
    "dust",              // 4: particulate estimate

    // === Patient (5-9) ===
    "age",               // 5: years
    "smoker_level",      // 6: 0 non, 1 passive, 2 active
    "allergy_present",   // 7: 0/1
    "allergy_type",      // 8: 0 none .. 4 other
    "occupation_risk",   // 9: 0 home/office .. 2 factory/heavy
];

/// Total number of derivable features
pub const FEATURE_COUNT: usize = 10;

/// A derivable feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureName {
    Humidity,
    Temperature,
    Mq2,
    Mq135,
    Dust,
    Age,
    SmokerLevel,
    AllergyPresent,
    AllergyType,
    OccupationRisk,
}

impl FeatureName {
    /// All features, in `FEATURE_LAYOUT` order
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::Humidity,
        FeatureName::Temperature,
        FeatureName::Mq2,
        FeatureName::Mq135,
        FeatureName::Dust,
        FeatureName::Age,
        FeatureName::SmokerLevel,
        FeatureName::AllergyPresent,
        FeatureName::AllergyType,
        FeatureName::OccupationRisk,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        FEATURE_LAYOUT[self.index()]
    }

    /// Exact, case-sensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        feature_index(name).map(|i| Self::ALL[i])
    }
}

impl std::fmt::Display for FeatureName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over an ordered list of feature names
///
/// Two schemas hash equal only if they list the same names in the same order.
pub fn compute_layout_hash<S: AsRef<str>>(names: &[S]) -> u32 {
    let mut hasher = Hasher::new();

    for name in names {
        hasher.update(name.as_ref().as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Hash of the canonical training layout
pub fn canonical_layout_hash() -> u32 {
    compute_layout_hash(FEATURE_LAYOUT)
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout information for status views and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
    /// Schema entries the scorer cannot derive (always encoded as 0.0)
    pub unknown_features: Vec<String>,
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
        assert_eq!(FeatureName::ALL.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_enum_matches_layout() {
        for (i, name) in FeatureName::ALL.iter().enumerate() {
            assert_eq!(name.index(), i);
            assert_eq!(FeatureName::from_name(name.as_str()), Some(*name));
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(FeatureName::from_name("mq135"), Some(FeatureName::Mq135));
        assert_eq!(FeatureName::from_name("MQ135"), None);
        assert_eq!(FeatureName::from_name("dust_equiv"), None);
        assert_eq!(feature_name(9), Some("occupation_risk"));
        assert_eq!(feature_name(10), None);
    }

    #[test]
    fn test_layout_hash_is_order_sensitive() {
        let a = compute_layout_hash(&["mq2", "age"]);
        let b = compute_layout_hash(&["age", "mq2"]);
        assert_ne!(a, b);
        assert_eq!(a, compute_layout_hash(&["mq2".to_string(), "age".to_string()]));
        assert_ne!(canonical_layout_hash(), 0);
    }

    #[test]
    fn test_separator_prevents_concatenation_collisions() {
        assert_ne!(compute_layout_hash(&["mq", "2"]), compute_layout_hash(&["mq2"]));
    }
}
