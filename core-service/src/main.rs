//! Asthma Guard offline scorer
//!
//! Usage: `asthma-score <reading.json> [patient.json]`
//!
//! Loads the model the same way the server does (`MODEL_PATH`,
//! `FEATURES_PATH`, `DATA_DIR`, `MODEL_SHA256`) and prints the assessment.

use std::path::Path;
use std::process::ExitCode;

use asthma_guard_core::{load_model, ModelConfig, PatientProfile, RiskScorer, SensorPayload};

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

fn run() -> Result<(), String> {
    let mut args = std::env::args().skip(1);
    let reading_path = args.next()
        .ok_or_else(|| "usage: asthma-score <reading.json> [patient.json]".to_string())?;

    let payload: SensorPayload = read_json(Path::new(&reading_path))?;
    let patient: Option<PatientProfile> = match args.next() {
        Some(path) => Some(read_json(Path::new(&path))?),
        None => None,
    };

    let scorer = RiskScorer::new(load_model(&ModelConfig::from_env()));
    let assessment = scorer.score(&payload.resolve(), patient.as_ref());

    let output = serde_json::to_string_pretty(&assessment).map_err(|e| e.to_string())?;
    println!("{}", output);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
