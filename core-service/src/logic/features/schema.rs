//! Feature Schema - the model's declared column order
//!
//! Loaded once, alongside the classifier, from a JSON array of feature
//! names (`features_future.json`). The vector handed to the classifier is
//! built by walking this list in order. Names the scorer cannot derive are
//! encoded as 0.0; nothing is padded for features the schema omits.

use std::path::Path;

use thiserror::Error;

use super::layout::{compute_layout_hash, FeatureName, LayoutInfo};
use super::vector::{FeatureMap, FeatureVector};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read feature schema: {0}")]
    Io(#[from] std::io::Error),

    #[error("feature schema is not a JSON array of names: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered list of feature names
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureSchema {
    names: Vec<String>,
    resolved: Vec<Option<FeatureName>>,
    layout_hash: u32,
}

impl FeatureSchema {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let resolved = names.iter().map(|n| FeatureName::from_name(n)).collect();
        let layout_hash = compute_layout_hash(&names);

        Self { names, resolved, layout_hash }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let names: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::new(names))
    }

    /// Load schema from disk
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        let schema = Self::from_json_str(&content)?;

        let unknown = schema.unknown_names();
        if !unknown.is_empty() {
            log::warn!(
                "Feature schema {} lists {} feature(s) the scorer cannot derive, they will be 0.0: {:?}",
                path.display(),
                unknown.len(),
                unknown
            );
        }

        Ok(schema)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    /// Names present in the schema that map to no derivable feature
    pub fn unknown_names(&self) -> Vec<&str> {
        self.names.iter()
            .zip(self.resolved.iter())
            .filter(|(_, f)| f.is_none())
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Flatten a feature map into schema order
    pub fn vectorize(&self, map: &FeatureMap) -> FeatureVector {
        let values = self.resolved.iter()
            .map(|f| f.map(|f| map.get(f)).unwrap_or(0.0))
            .collect();

        FeatureVector::new(self.layout_hash, values)
    }

    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            hash: self.layout_hash,
            feature_count: self.names.len(),
            feature_names: self.names.clone(),
            unknown_features: self.unknown_names().into_iter().map(String::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::FEATURE_LAYOUT;

    #[test]
    fn test_from_json() {
        let schema = FeatureSchema::from_json_str(r#"["mq2", "age"]"#).unwrap();
        assert_eq!(schema.names(), &["mq2".to_string(), "age".to_string()]);
        assert_eq!(schema.len(), 2);
        assert!(schema.unknown_names().is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(
            FeatureSchema::from_json_str(r#"{"features": ["mq2"]}"#),
            Err(SchemaError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_names_encode_zero() {
        let schema = FeatureSchema::new(["age", "pm25", "mq2"]);
        let mut map = FeatureMap::default();
        map.set(FeatureName::Age, 40.0);
        map.set(FeatureName::Mq2, 7.0);

        assert_eq!(schema.unknown_names(), vec!["pm25"]);
        assert_eq!(schema.vectorize(&map).values, vec![40.0, 0.0, 7.0]);
    }

    #[test]
    fn test_canonical_layout_hash_matches() {
        let schema = FeatureSchema::new(FEATURE_LAYOUT.iter().copied());
        assert_eq!(schema.layout_hash(), super::super::layout::canonical_layout_hash());
        assert_eq!(schema.info().feature_count, 10);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = FeatureSchema::load(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(SchemaError::Io(_))));
    }
}
