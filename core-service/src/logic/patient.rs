//! Patient profile
//!
//! The profile document keeps categorical answers as their display strings
//! (that is what the profile form posts). The typed enums below encode
//! them for the model; anything unrecognized maps to the lowest-risk code.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// CATEGORICAL FIELDS
// ============================================================================

/// Smoking exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmokerStatus {
    #[default]
    NonSmoker,
    PassiveSmoker,
    ActiveSmoker,
}

impl SmokerStatus {
    pub const ALL: [SmokerStatus; 3] = [
        SmokerStatus::NonSmoker,
        SmokerStatus::PassiveSmoker,
        SmokerStatus::ActiveSmoker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SmokerStatus::NonSmoker => "Non-smoker",
            SmokerStatus::PassiveSmoker => "Passive smoker",
            SmokerStatus::ActiveSmoker => "Active smoker",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }

    /// `smoker_level` feature: 0 = non, 1 = passive, 2 = active
    pub fn level(&self) -> f64 {
        match self {
            SmokerStatus::NonSmoker => 0.0,
            SmokerStatus::PassiveSmoker => 1.0,
            SmokerStatus::ActiveSmoker => 2.0,
        }
    }
}

/// Whether the patient reports any allergy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllergyPresence {
    Yes,
    #[default]
    No,
}

impl AllergyPresence {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllergyPresence::Yes => "Yes",
            AllergyPresence::No => "No",
        }
    }

    /// Only the exact answer "Yes" counts as present
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Yes" => Some(AllergyPresence::Yes),
            "No" => Some(AllergyPresence::No),
            _ => None,
        }
    }

    pub fn flag(&self) -> f64 {
        match self {
            AllergyPresence::Yes => 1.0,
            AllergyPresence::No => 0.0,
        }
    }
}

/// Allergen category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllergyType {
    #[default]
    None,
    Dust,
    Pollen,
    Pets,
    Other,
}

impl AllergyType {
    pub const ALL: [AllergyType; 5] = [
        AllergyType::None,
        AllergyType::Dust,
        AllergyType::Pollen,
        AllergyType::Pets,
        AllergyType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AllergyType::None => "None",
            AllergyType::Dust => "Dust",
            AllergyType::Pollen => "Pollen",
            AllergyType::Pets => "Pets",
            AllergyType::Other => "Other",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == label)
    }

    pub fn code(&self) -> f64 {
        match self {
            AllergyType::None => 0.0,
            AllergyType::Dust => 1.0,
            AllergyType::Pollen => 2.0,
            AllergyType::Pets => 3.0,
            AllergyType::Other => 4.0,
        }
    }
}

/// Occupational exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occupation {
    #[default]
    HomeOffice,
    OutdoorTraffic,
    FactoryHeavy,
}

impl Occupation {
    pub const ALL: [Occupation; 3] = [
        Occupation::HomeOffice,
        Occupation::OutdoorTraffic,
        Occupation::FactoryHeavy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Occupation::HomeOffice => "Home/Office",
            Occupation::OutdoorTraffic => "Outdoor/Traffic",
            Occupation::FactoryHeavy => "Factory/Heavy",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == label)
    }

    /// `occupation_risk` feature
    pub fn risk(&self) -> f64 {
        match self {
            Occupation::HomeOffice => 0.0,
            Occupation::OutdoorTraffic => 1.0,
            Occupation::FactoryHeavy => 2.0,
        }
    }
}

// ============================================================================
// PROFILE DOCUMENT
// ============================================================================

/// Patient profile as stored in `patient.json`
///
/// Deserialization falls back field by field: a missing or wrongly typed
/// field takes its default without disturbing the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct PatientProfile {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub smoker: String,
    pub allergy_present: String,
    pub allergy_type: String,
    pub occupation: String,
}

pub const DEFAULT_AGE: i64 = 21;

fn default_name() -> String { "Hari".to_string() }
fn default_age() -> i64 { DEFAULT_AGE }
fn default_gender() -> String { "Male".to_string() }
fn default_smoker() -> String { SmokerStatus::default().as_str().to_string() }
fn default_allergy_present() -> String { AllergyPresence::default().as_str().to_string() }
fn default_allergy_type() -> String { AllergyType::default().as_str().to_string() }
fn default_occupation() -> String { Occupation::default().as_str().to_string() }

/// Text field: strings as-is, numbers in their JSON form, anything else
/// falls back.
fn text_field(doc: &Map<String, Value>, key: &str, fallback: fn() -> String) -> String {
    match doc.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            log::debug!("Profile field {} has unusable value {}, using default", key, other);
            fallback()
        }
        None => fallback(),
    }
}

/// Age accepts integers, floats (truncated), numeric strings and booleans
fn age_field(doc: &Map<String, Value>) -> i64 {
    let age = match doc.get("age") {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64),
        Some(Value::Bool(b)) => Some(i64::from(*b)),
        _ => None,
    };
    age.unwrap_or_else(default_age)
}

impl From<Value> for PatientProfile {
    fn from(value: Value) -> Self {
        let Value::Object(doc) = value else {
            log::warn!("Patient profile is not a JSON object, using defaults");
            return Self::default();
        };

        Self {
            name: text_field(&doc, "name", default_name),
            age: age_field(&doc),
            gender: text_field(&doc, "gender", default_gender),
            smoker: text_field(&doc, "smoker", default_smoker),
            allergy_present: text_field(&doc, "allergy_present", default_allergy_present),
            allergy_type: text_field(&doc, "allergy_type", default_allergy_type),
            occupation: text_field(&doc, "occupation", default_occupation),
        }
    }
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            age: default_age(),
            gender: default_gender(),
            smoker: default_smoker(),
            allergy_present: default_allergy_present(),
            allergy_type: default_allergy_type(),
            occupation: default_occupation(),
        }
    }
}

impl PatientProfile {
    pub fn smoker_status(&self) -> SmokerStatus {
        SmokerStatus::parse(&self.smoker).unwrap_or_default()
    }

    pub fn allergy_presence(&self) -> AllergyPresence {
        AllergyPresence::parse(&self.allergy_present).unwrap_or_default()
    }

    pub fn allergy_kind(&self) -> AllergyType {
        AllergyType::parse(&self.allergy_type).unwrap_or_default()
    }

    pub fn occupation_kind(&self) -> Occupation {
        Occupation::parse(&self.occupation).unwrap_or_default()
    }

    /// Apply a profile form submission. Fields left out keep their value;
    /// an age that does not parse as an integer keeps the old age.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(age) = update.age {
            match age.trim().parse::<i64>() {
                Ok(age) => self.age = age,
                Err(_) => log::debug!("Ignoring unparsable age {:?}", age),
            }
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(smoker) = update.smoker {
            self.smoker = smoker;
        }
        if let Some(allergy_present) = update.allergy_present {
            self.allergy_present = allergy_present;
        }
        if let Some(allergy_type) = update.allergy_type {
            self.allergy_type = allergy_type;
        }
        if let Some(occupation) = update.occupation {
            self.occupation = occupation;
        }
    }
}

/// Profile form submission; every field optional, age kept as raw text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub smoker: Option<String>,
    pub allergy_present: Option<String>,
    pub allergy_type: Option<String>,
    pub occupation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let p = PatientProfile::default();
        assert_eq!(p.age, 21);
        assert_eq!(p.smoker_status(), SmokerStatus::NonSmoker);
        assert_eq!(p.allergy_presence(), AllergyPresence::No);
        assert_eq!(p.allergy_kind(), AllergyType::None);
        assert_eq!(p.occupation_kind(), Occupation::HomeOffice);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let p: PatientProfile = serde_json::from_str(r#"{"age": 40, "smoker": "Active smoker"}"#).unwrap();
        assert_eq!(p.age, 40);
        assert_eq!(p.name, "Hari");
        assert_eq!(p.smoker_status().level(), 2.0);
    }

    #[test]
    fn test_unknown_labels_fall_back() {
        let p = PatientProfile {
            smoker: "Vaper".to_string(),
            allergy_present: "yes".to_string(),
            allergy_type: "Mold".to_string(),
            occupation: "Astronaut".to_string(),
            ..Default::default()
        };
        assert_eq!(p.smoker_status().level(), 0.0);
        assert_eq!(p.allergy_presence().flag(), 0.0);
        assert_eq!(p.allergy_kind().code(), 0.0);
        assert_eq!(p.occupation_kind().risk(), 0.0);
    }

    #[test]
    fn test_label_round_trip() {
        for s in SmokerStatus::ALL {
            assert_eq!(SmokerStatus::parse(s.as_str()), Some(s));
        }
        for t in AllergyType::ALL {
            assert_eq!(AllergyType::parse(t.as_str()), Some(t));
        }
        for o in Occupation::ALL {
            assert_eq!(Occupation::parse(o.as_str()), Some(o));
        }
    }

    #[test]
    fn test_apply_update_keeps_age_on_bad_input() {
        let mut p = PatientProfile::default();
        p.apply(ProfileUpdate {
            age: Some("forty".to_string()),
            occupation: Some("Factory/Heavy".to_string()),
            ..Default::default()
        });
        assert_eq!(p.age, 21);
        assert_eq!(p.occupation_kind(), Occupation::FactoryHeavy);

        p.apply(ProfileUpdate { age: Some(" 35 ".to_string()), ..Default::default() });
        assert_eq!(p.age, 35);
        assert_eq!(p.name, "Hari");
    }

    #[test]
    fn test_mistyped_fields_fall_back_individually() {
        let p: PatientProfile = serde_json::from_str(
            r#"{"age": "40", "smoker": "Active smoker", "occupation": "Factory/Heavy", "name": null}"#,
        ).unwrap();
        assert_eq!(p.age, 40);
        assert_eq!(p.name, "Hari");
        assert_eq!(p.smoker_status(), SmokerStatus::ActiveSmoker);
        assert_eq!(p.occupation_kind(), Occupation::FactoryHeavy);

        let p: PatientProfile = serde_json::from_str(r#"{"age": 40.7, "gender": ["x"]}"#).unwrap();
        assert_eq!(p.age, 40);
        assert_eq!(p.gender, "Male");

        let p: PatientProfile = serde_json::from_str(r#"{"age": null, "allergy_present": "Yes"}"#).unwrap();
        assert_eq!(p.age, 21);
        assert_eq!(p.allergy_presence(), AllergyPresence::Yes);
    }
}
