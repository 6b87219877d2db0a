//! Badge image fetch from the shields-compatible rendering service.

use bytes::Bytes;
use tracing::info;

use crate::badge::BadgeSpec;
use crate::error::BadgeError;
use crate::state::SharedState;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

pub struct BadgeImage {
    pub content_type: String,
    pub body: Bytes,
}

pub async fn fetch_badge(state: &SharedState, spec: &BadgeSpec) -> Result<BadgeImage, BadgeError> {
    let url = spec.image_url(&state.config.shields_url);

    let resp = state.http_client.get(url.clone()).send().await.map_err(|e| {
        info!("GET failed {}: {}", url, e);
        BadgeError::BadgeRenderUnavailable(e.to_string())
    })?;
    info!("GET {} {}", resp.status().as_u16(), url);

    if !resp.status().is_success() {
        return Err(BadgeError::BadgeRenderUnavailable(format!(
            "{} returned {}",
            url,
            resp.status()
        )));
    }

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(SVG_CONTENT_TYPE)
        .to_string();

    let body = resp
        .bytes()
        .await
        .map_err(|e| BadgeError::BadgeRenderUnavailable(format!("reading {}: {}", url, e)))?;

    Ok(BadgeImage { content_type, body })
}
