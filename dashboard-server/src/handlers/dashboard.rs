//! Dashboard view handlers

use axum::{extract::State, Json};

use asthma_guard_core::logic::storage::{AlertRecord, AttackRecord};
use asthma_guard_core::logic::views::{self, DashboardView, GraphPoint};

use super::blocking;
use crate::{AppResult, AppState};

/// Latest reading with its live assessment
pub async fn overview(State(state): State<AppState>) -> AppResult<Json<DashboardView>> {
    let view = blocking(move || views::dashboard(&state.store, &state.scorer)).await?;
    Ok(Json(view))
}

pub async fn alerts(State(state): State<AppState>) -> AppResult<Json<Vec<AlertRecord>>> {
    let alerts = blocking(move || views::alerts(&state.store)).await?;
    Ok(Json(alerts))
}

/// Attack log, newest first
pub async fn attack_history(State(state): State<AppState>) -> AppResult<Json<Vec<AttackRecord>>> {
    let attacks = blocking(move || views::attack_history(&state.store)).await?;
    Ok(Json(attacks))
}

pub async fn graphs(State(state): State<AppState>) -> AppResult<Json<Vec<GraphPoint>>> {
    let window = state.config.graph_window;
    let points = blocking(move || views::graph_series(&state.store, window)).await?;
    Ok(Json(points))
}
