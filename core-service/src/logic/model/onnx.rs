//! ONNX Classifier - ONNX Runtime Integration
//!
//! Runs a classifier exported from the training pipeline (skl2onnx /
//! onnxmltools, exported with `zipmap=False` so probabilities come back as a
//! plain `[N, 2]` tensor). Input is a single `[1, n]` f32 row.

use std::path::Path;

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use super::classifier::{Classifier, ClassifierError};

/// Output names used by the common sklearn/xgboost converters
const PROBABILITY_OUTPUTS: &[&str] = &["probabilities", "output_probability"];

pub struct OnnxClassifier {
    /// `Session::run` needs `&mut`
    session: Mutex<Session>,
    output_name: String,
    name: String,
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn from_file(model_path: &Path) -> Result<Self, ClassifierError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        let session = Session::builder()
            .map_err(|e| ClassifierError::Runtime(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ClassifierError::Runtime(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ClassifierError::Runtime(format!("Failed to load model: {}", e)))?;

        let name = format!(
            "onnx:{}",
            model_path.file_name().map(|f| f.to_string_lossy().into_owned()).unwrap_or_default()
        );
        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let output_name = select_output(&output_names)
            .ok_or_else(|| ClassifierError::InvalidOutput("No output defined".to_string()))?;

        log::info!("ONNX model ready, reading output '{}' of {:?}", output_name, output_names);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            name,
        })
    }
}

/// Prefer a known probability output, otherwise the last one declared
fn select_output(output_names: &[String]) -> Option<String> {
    PROBABILITY_OUTPUTS.iter()
        .find(|wanted| output_names.iter().any(|n| n == *wanted))
        .map(|n| n.to_string())
        .or_else(|| output_names.last().cloned())
}

/// `[1, 2]` gives P(class 1); a single column is already P(positive)
fn positive_probability(data: &[f32]) -> Result<f32, ClassifierError> {
    match data {
        [] => Err(ClassifierError::InvalidOutput("Empty probability tensor".to_string())),
        [p] => Ok(*p),
        [_, p, ..] => Ok(*p),
    }
}

impl Classifier for OnnxClassifier {
    fn predict_probability(&self, features: &[f64]) -> Result<f64, ClassifierError> {
        let start_time = std::time::Instant::now();

        let row: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let input_array = Array2::<f32>::from_shape_vec((1, row.len()), row)
            .map_err(|e| ClassifierError::Runtime(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ClassifierError::Runtime(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| ClassifierError::Runtime(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&self.output_name)
            .ok_or_else(|| ClassifierError::InvalidOutput(format!("No output '{}'", self.output_name)))?;

        let output_tensor = output.try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::InvalidOutput(format!("Extract error: {}", e)))?;

        let probability = positive_probability(output_tensor.1)?;

        log::trace!(
            "ONNX inference took {}us, p = {}",
            start_time.elapsed().as_micros(),
            probability
        );

        Ok(probability as f64)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
