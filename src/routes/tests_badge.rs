use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{info, warn};

use crate::assets::badge_response;
use crate::badge::{resolve_badge, ServiceResult};
use crate::error::BadgeError;
use crate::state::SharedState;

pub const ROUTE_PREFIX: &str = "/tests/";

#[derive(Deserialize)]
pub struct BadgeQuery {
    pub service: Option<String>,
}

/// Split the raw request path into `(job, branch)`. The branch is the last
/// segment; everything before it is the job path. Percent-encoding is kept
/// so encoded branch names (`feature%2Flogin`) reach Jenkins untouched.
pub fn split_job_path(raw: &str) -> Result<(&str, &str), BadgeError> {
    let trimmed = raw.trim_matches('/');
    if trimmed.split('/').any(is_dot_segment) {
        return Err(BadgeError::InvalidRequest(format!(
            "dot segments not allowed in {:?}",
            raw
        )));
    }
    match trimmed.rsplit_once('/') {
        Some((job, branch)) if !job.is_empty() && !branch.is_empty() => Ok((job, branch)),
        _ => Err(BadgeError::InvalidRequest(format!(
            "expected /tests/<job>/<branch>, got {:?}",
            raw
        ))),
    }
}

/// `.` and `..` in any spelling URL resolution treats as a dot segment,
/// including the percent-encoded `%2e` forms.
fn is_dot_segment(seg: &str) -> bool {
    let decoded = seg.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// GET /tests/{*path}?service=<name> — test badge for the last build.
pub async fn tests_badge(
    State(state): State<SharedState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<BadgeQuery>, QueryRejection>,
) -> Result<Response, BadgeError> {
    let Query(query) = query.map_err(|e| BadgeError::InvalidRequest(e.body_text()))?;
    let raw = uri.path().strip_prefix(ROUTE_PREFIX).unwrap_or(uri.path());
    let (job, branch) = split_job_path(raw)?;
    let service = query.service.filter(|s| !s.is_empty());

    let record = crate::jenkins::fetch_last_build(&state, job, branch).await?;
    let file_result = load_file_result(&state, service).await;

    let spec = resolve_badge(record, file_result, &state.config.thresholds);
    let image = crate::shields::fetch_badge(&state, &spec).await?;

    info!(
        "Sending tests badge for {}/{}: {} ({})",
        job, branch, spec.value, spec.colour
    );
    Ok(badge_response(&image.content_type, image.body))
}

/// Re-read the results file for this request. Any failure means "no
/// file-backed result".
async fn load_file_result(state: &SharedState, service: Option<String>) -> Option<ServiceResult> {
    let path = state.config.results_file.clone()?;
    let read = tokio::task::spawn_blocking(move || {
        crate::badge::results_file::read_results(&path, service.as_deref())
    })
    .await;

    match read {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            warn!("Ignoring results file: {}", e);
            None
        }
        Err(e) => {
            warn!("Results file reader task failed: {}", e);
            None
        }
    }
}

/// GET /favicon.ico — browsers probe it on the badge host; nothing to serve.
pub async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
