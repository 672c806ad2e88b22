//! Logistic Classifier - pure Rust fallback model
//!
//! Reads a JSON artifact exported from a scikit-learn `LogisticRegression`
//! (optionally behind a `StandardScaler`):
//!
//! ```json
//! { "coefficients": [0.8, -0.1], "intercept": -2.0,
//!   "scaler_mean": [60.0, 30.0], "scaler_scale": [15.0, 5.0] }
//! ```
//!
//! Coefficients follow the feature schema's order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, ClassifierError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler_mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scaler_scale: Option<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    model: LogisticModel,
    name: String,
}

impl LogisticClassifier {
    pub fn new(model: LogisticModel) -> Result<Self, ClassifierError> {
        let n = model.coefficients.len();
        for (label, params) in [("scaler_mean", &model.scaler_mean), ("scaler_scale", &model.scaler_scale)] {
            if let Some(params) = params {
                if params.len() != n {
                    return Err(ClassifierError::InvalidOutput(format!(
                        "{} has {} entries for {} coefficients",
                        label,
                        params.len(),
                        n
                    )));
                }
            }
        }

        Ok(Self {
            name: format!("logistic ({} features)", n),
            model,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ClassifierError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::Runtime(format!("Failed to read {}: {}", path.display(), e)))?;
        let model: LogisticModel = serde_json::from_str(&content)
            .map_err(|e| ClassifierError::Runtime(format!("Failed to parse {}: {}", path.display(), e)))?;

        let mut classifier = Self::new(model)?;
        if let Some(file) = path.file_name() {
            classifier.name = format!("logistic:{}", file.to_string_lossy());
        }
        Ok(classifier)
    }

    fn standardize(&self, index: usize, value: f64) -> f64 {
        let mean = self.model.scaler_mean.as_ref().map(|m| m[index]).unwrap_or(0.0);
        let scale = self.model.scaler_scale.as_ref().map(|s| s[index]).unwrap_or(1.0);
        // sklearn leaves zero-variance columns unscaled
        let scale = if scale == 0.0 { 1.0 } else { scale };
        (value - mean) / scale
    }
}

impl Classifier for LogisticClassifier {
    fn predict_probability(&self, features: &[f64]) -> Result<f64, ClassifierError> {
        let expected = self.model.coefficients.len();
        if features.len() != expected {
            return Err(ClassifierError::InputLength { expected, actual: features.len() });
        }

        let logit = features.iter()
            .zip(self.model.coefficients.iter())
            .enumerate()
            .map(|(i, (&x, &w))| w * self.standardize(i, x))
            .sum::<f64>()
            + self.model.intercept;

        Ok(sigmoid(logit))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(coefficients: Vec<f64>, intercept: f64) -> LogisticModel {
        LogisticModel { coefficients, intercept, scaler_mean: None, scaler_scale: None }
    }

    #[test]
    fn test_zero_logit_is_half() {
        let c = LogisticClassifier::new(model(vec![1.0, -1.0], 0.0)).unwrap();
        let p = c.predict_probability(&[2.0, 2.0]).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_known_output() {
        // logit = 0.5*4 - 1 = 1
        let c = LogisticClassifier::new(model(vec![0.5], -1.0)).unwrap();
        let p = c.predict_probability(&[4.0]).unwrap();
        assert!((p - 0.731_058_578_630_004_9).abs() < 1e-12);
    }

    #[test]
    fn test_scaler_applied() {
        let mut m = model(vec![1.0], 0.0);
        m.scaler_mean = Some(vec![10.0]);
        m.scaler_scale = Some(vec![2.0]);
        let c = LogisticClassifier::new(m).unwrap();

        // (10 - 10) / 2 = 0 -> 0.5
        assert!((c.predict_probability(&[10.0]).unwrap() - 0.5).abs() < 1e-12);
        // (12 - 10) / 2 = 1
        assert!(c.predict_probability(&[12.0]).unwrap() > 0.73);
    }

    #[test]
    fn test_length_mismatch() {
        let c = LogisticClassifier::new(model(vec![1.0, 2.0], 0.0)).unwrap();
        assert!(matches!(
            c.predict_probability(&[1.0]),
            Err(ClassifierError::InputLength { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_scaler_length_checked() {
        let mut m = model(vec![1.0, 2.0], 0.0);
        m.scaler_mean = Some(vec![0.0]);
        assert!(LogisticClassifier::new(m).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk_model.json");
        std::fs::write(&path, r#"{"coefficients": [0.0], "intercept": 0.0}"#).unwrap();

        let c = LogisticClassifier::from_file(&path).unwrap();
        assert_eq!(c.name(), "logistic:risk_model.json");
        assert!((c.predict_probability(&[3.0]).unwrap() - 0.5).abs() < 1e-12);
    }
}
