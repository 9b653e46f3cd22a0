//! Client configuration endpoint.

use axum::Json;
use axum::extract::State;
use records::config::DashboardConfig;

use crate::state::AppState;

/// `GET /api/config`: the selected variant as JSON.
pub async fn get_config(State(state): State<AppState>) -> Json<DashboardConfig> {
    Json(DashboardConfig::clone(&state.config))
}
