//! Feature Map and Feature Vector
//!
//! `FeatureMap` holds the ten derived values by name. `FeatureVector` is the
//! flattened, schema-ordered input handed to the classifier, tagged with the
//! schema's layout hash.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::{FeatureName, FEATURE_COUNT};
use crate::logic::patient::PatientProfile;
use crate::logic::reading::SensorReading;

// ============================================================================
// FEATURE MAP
// ============================================================================

/// Derived feature values, indexed by `FeatureName`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureMap {
    values: [f64; FEATURE_COUNT],
}

impl FeatureMap {
    /// Derive all features from a reading and a profile
    pub fn derive(sensor: &SensorReading, patient: &PatientProfile) -> Self {
        let mut map = Self::default();

        // Sensor
        map.set(FeatureName::Humidity, sensor.humidity);
        map.set(FeatureName::Temperature, sensor.temperature);
        map.set(FeatureName::Mq2, sensor.mq2);
        map.set(FeatureName::Mq135, sensor.mq135);
        map.set(FeatureName::Dust, sensor.dust_equiv);

        // Patient
        map.set(FeatureName::Age, patient.age as f64);
        map.set(FeatureName::SmokerLevel, patient.smoker_status().level());
        map.set(FeatureName::AllergyPresent, patient.allergy_presence().flag());
        map.set(FeatureName::AllergyType, patient.allergy_kind().code());
        map.set(FeatureName::OccupationRisk, patient.occupation_kind().risk());

        map
    }

    pub fn get(&self, name: FeatureName) -> f64 {
        self.values[name.index()]
    }

    pub fn set(&mut self, name: FeatureName, value: f64) {
        self.values[name.index()] = value;
    }

    /// Look a feature up by its schema name
    pub fn lookup(&self, name: &str) -> Option<f64> {
        FeatureName::from_name(name).map(|f| self.get(f))
    }
}

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Schema-ordered classifier input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// CRC32 of the schema that produced this vector
    pub layout_hash: u32,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(layout_hash: u32, values: Vec<f64>) -> Self {
        Self { layout_hash, values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON form for debug logging, values paired with schema names
    pub fn to_log_entry(&self, names: &[String]) -> serde_json::Value {
        serde_json::json!({
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": names.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.clone(), *value))
                .collect::<BTreeMap<_, _>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_sensor_features() {
        let sensor = SensorReading::new(30.2, 60.0, 1.0, 0.0, 95.0);
        let map = FeatureMap::derive(&sensor, &PatientProfile::default());

        assert_eq!(map.get(FeatureName::Temperature), 30.2);
        assert_eq!(map.get(FeatureName::Humidity), 60.0);
        assert_eq!(map.get(FeatureName::Mq2), 1.0);
        assert_eq!(map.get(FeatureName::Dust), 95.0);
        assert_eq!(map.get(FeatureName::Age), 21.0);
    }

    #[test]
    fn test_lookup_by_name() {
        let mut map = FeatureMap::default();
        map.set(FeatureName::OccupationRisk, 2.0);
        assert_eq!(map.lookup("occupation_risk"), Some(2.0));
        assert_eq!(map.lookup("wind_speed"), None);
    }

    #[test]
    fn test_log_entry_pairs_names() {
        let vector = FeatureVector::new(7, vec![7.0, 40.0]);
        let names = vec!["mq2".to_string(), "age".to_string()];
        let entry = vector.to_log_entry(&names);

        assert_eq!(entry["layout_hash"], 7);
        assert_eq!(entry["named_values"]["age"], 40.0);
    }
}
