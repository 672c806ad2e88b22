//! Sensor handlers

use axum::{body::Bytes, extract::State, Json};

use asthma_guard_core::logic::ingest::{ingest_reading, predict_once, IngestOutcome};
use asthma_guard_core::logic::storage::timestamp_now;
use asthma_guard_core::{RiskAssessment, SensorPayload};

use super::blocking;
use crate::{AppError, AppResult, AppState};

/// Devices post without a reliable content type; an empty body or `null`
/// counts as an empty reading.
fn parse_payload(body: &[u8]) -> AppResult<SensorPayload> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SensorPayload::default());
    }

    serde_json::from_slice::<Option<SensorPayload>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| AppError::ValidationError(format!("Invalid sensor payload: {}", e)))
}

/// Store a device reading, score it, log high risk events
pub async fn ingest(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<IngestOutcome>> {
    let payload = parse_payload(&body)?;
    let timestamp = timestamp_now();

    let outcome = blocking(move || {
        ingest_reading(&state.store, &state.scorer, &payload, timestamp)
    }).await??;

    tracing::debug!("Reading at {} scored {}", outcome.timestamp, outcome.label);
    Ok(Json(outcome))
}

/// Score a reading without storing it
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<RiskAssessment>> {
    let payload = parse_payload(&body)?;

    let assessment = blocking(move || {
        predict_once(&state.store, &state.scorer, &payload)
    }).await?;

    Ok(Json(assessment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_and_null() {
        assert!(parse_payload(b"").unwrap().temperature.is_none());
        assert!(parse_payload(b"null").unwrap().humidity.is_none());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_payload(b"{\"mq2\": \"lots\"}"), Err(AppError::ValidationError(_))));
        assert!(matches!(parse_payload(b"not json"), Err(AppError::ValidationError(_))));
    }
}
