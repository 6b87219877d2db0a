use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};

use crate::config::BADGE_CACHE_MAX_AGE_SECS;
use crate::shields::SVG_CONTENT_TYPE;

const ERROR_BADGE_SVG: &str = include_str!("../static/error_badge.svg");

/// Response headers shared by real and error badges.
pub fn badge_response(content_type: &str, body: impl IntoResponse) -> Response {
    let mut resp = body.into_response();
    let headers = resp.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(SVG_CONTENT_TYPE)),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_str(&format!("max-age={}", BADGE_CACHE_MAX_AGE_SECS))
            .unwrap_or_else(|_| HeaderValue::from_static("no-cache")),
    );
    resp
}

pub fn error_badge_response() -> Response {
    badge_response(SVG_CONTENT_TYPE, ERROR_BADGE_SVG)
}

pub fn error_badge_svg() -> &'static str {
    ERROR_BADGE_SVG
}
