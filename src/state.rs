use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::BadgeConfig;
use crate::error::BadgeError;

pub type SharedState = Arc<AppState>;

/// Read-only state shared by every request.
pub struct AppState {
    pub config: BadgeConfig,
    pub http_client: reqwest::Client,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: BadgeConfig) -> Result<Self, BadgeError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(4)
            .user_agent(concat!("jenkins-badges/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BadgeError::InvalidConfig(format!("HTTP client: {}", e)))?;
        Ok(Self {
            config,
            http_client,
            started_at: Utc::now(),
        })
    }
}
