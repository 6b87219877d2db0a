use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Optional JSON settings file. Any field left out falls back to the CLI
/// default; CLI flags always win over the file.
#[derive(Debug, Deserialize, Default)]
pub struct PersistentSettings {
    pub jenkins_url: Option<String>,
    pub username: Option<String>,
    pub token: Option<String>,
    pub shields_url: Option<String>,
    pub yellow_threshold: Option<f64>,
    pub red_threshold: Option<f64>,
    pub results_file: Option<PathBuf>,
    pub port: Option<u16>,
}

pub fn load_settings(path: &Path) -> PersistentSettings {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring unparsable settings file {:?}: {}", path, e);
                PersistentSettings::default()
            }
        },
        Err(e) => {
            warn!("Could not read settings file {:?}: {}", path, e);
            PersistentSettings::default()
        }
    }
}
