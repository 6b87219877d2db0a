use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum BadgeError {
    #[error("Jenkins unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Badge service unavailable: {0}")]
    BadgeRenderUnavailable(String),

    #[error("Results file not found: {0:?}")]
    ResultsFileNotFound(PathBuf),

    #[error("Results file is not valid JSON: {0}")]
    ResultsFileParse(String),

    #[error("Results file failed validation: {0}")]
    ResultsFileInvalid(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Every failure that reaches a client is rendered as the static error badge
/// with a 200, so embedding pages never show a broken image.
impl IntoResponse for BadgeError {
    fn into_response(self) -> Response {
        warn!("Sending error badge: {}", self);
        crate::assets::error_badge_response()
    }
}
