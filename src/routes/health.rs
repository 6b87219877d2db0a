use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::badge::Thresholds;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub started_at: String,
    pub jenkins_url: String,
    pub results_file_configured: bool,
    pub thresholds: Thresholds,
}

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(build_health_response(&state))
}

pub fn build_health_response(state: &SharedState) -> HealthResponse {
    HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at.to_rfc3339(),
        jenkins_url: state.config.jenkins_url.to_string(),
        results_file_configured: state.config.results_file.is_some(),
        thresholds: state.config.thresholds,
    }
}
