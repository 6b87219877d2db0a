use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::badge::Thresholds;
use crate::error::BadgeError;
use crate::settings::{load_settings, PersistentSettings};

/// Jenkins badges: serves test-result badges for Jenkins jobs.
#[derive(Parser, Debug, Clone)]
#[command(name = "jenkins-badges")]
pub struct CliArgs {
    /// Base URL of the Jenkins instance
    #[arg(short = 'j', long = "jenkins-url", env = "JENKINS_BASE_URL")]
    pub jenkins_url: Option<String>,

    /// Jenkins user with read access (omit for anonymous access)
    #[arg(short = 'u', long = "username", env = "JENKINS_USERNAME")]
    pub username: Option<String>,

    /// API token for the Jenkins user
    #[arg(short = 't', long = "token", env = "JENKINS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the shields-compatible badge service
    #[arg(long = "shields-url")]
    pub shields_url: Option<String>,

    /// Pass ratio above which a badge is green
    #[arg(long = "yellow-threshold")]
    pub yellow_threshold: Option<f64>,

    /// Pass ratio below which a badge is red
    #[arg(long = "red-threshold")]
    pub red_threshold: Option<f64>,

    /// JSON test results file used instead of build parameters when present
    #[arg(short = 'r', long = "results-file")]
    pub results_file: Option<PathBuf>,

    /// JSON settings file supplying any option not given on the command line
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// HTTP port
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long = "bind", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Directory for daily rolling log files
    #[arg(short = 'l', long = "log-dir")]
    pub log_dir: Option<PathBuf>,

    /// Timeout for each outbound request
    #[arg(long = "request-timeout-secs", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct BadgeConfig {
    pub jenkins_url: Url,
    pub username: Option<String>,
    pub token: Option<String>,
    pub shields_url: Url,
    pub thresholds: Thresholds,
    pub results_file: Option<PathBuf>,
    pub port: u16,
    pub bind: String,
    pub request_timeout: Duration,
}

pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_SHIELDS_URL: &str = "https://img.shields.io/badge/";
pub const DEFAULT_YELLOW_THRESHOLD: f64 = 0.8;
pub const DEFAULT_RED_THRESHOLD: f64 = 0.5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Browsers and proxies may cache a badge for this long.
pub const BADGE_CACHE_MAX_AGE_SECS: u64 = 30;

impl BadgeConfig {
    /// Merge CLI args over the optional settings file and validate.
    pub fn from_args(args: CliArgs) -> Result<Self, BadgeError> {
        let settings = args
            .config
            .as_deref()
            .map(load_settings)
            .unwrap_or_default();
        Self::merge(args, settings)
    }

    pub fn merge(args: CliArgs, settings: PersistentSettings) -> Result<Self, BadgeError> {
        let jenkins_url = args
            .jenkins_url
            .or(settings.jenkins_url)
            .ok_or_else(|| BadgeError::InvalidConfig("a Jenkins URL is required".to_string()))?;
        let shields_url = args
            .shields_url
            .or(settings.shields_url)
            .unwrap_or_else(|| DEFAULT_SHIELDS_URL.to_string());

        let thresholds = Thresholds {
            yellow: args
                .yellow_threshold
                .or(settings.yellow_threshold)
                .unwrap_or(DEFAULT_YELLOW_THRESHOLD),
            red: args
                .red_threshold
                .or(settings.red_threshold)
                .unwrap_or(DEFAULT_RED_THRESHOLD),
        };
        validate_thresholds(&thresholds)?;

        Ok(BadgeConfig {
            jenkins_url: parse_base_url("Jenkins", &jenkins_url)?,
            username: args.username.or(settings.username),
            token: args.token.or(settings.token),
            shields_url: parse_base_url("badge service", &shields_url)?,
            thresholds,
            results_file: args.results_file.or(settings.results_file),
            port: args.port.or(settings.port).unwrap_or(DEFAULT_PORT),
            bind: args.bind,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
        })
    }

    /// Basic-auth pair, sent only when a user is configured.
    pub fn credentials(&self) -> Option<(&str, Option<&str>)> {
        self.username
            .as_deref()
            .map(|user| (user, self.token.as_deref()))
    }
}

pub fn validate_thresholds(t: &Thresholds) -> Result<(), BadgeError> {
    for (name, value) in [("yellow", t.yellow), ("red", t.red)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(BadgeError::InvalidConfig(format!(
                "{} threshold {} is outside [0, 1]",
                name, value
            )));
        }
    }
    if t.red >= t.yellow {
        return Err(BadgeError::InvalidConfig(format!(
            "red threshold {} must be below yellow threshold {}",
            t.red, t.yellow
        )));
    }
    Ok(())
}

/// Parse a base URL, making sure it ends in `/` so relative joins keep
/// the full base path.
pub fn parse_base_url(what: &str, raw: &str) -> Result<Url, BadgeError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| BadgeError::InvalidConfig(format!("{} URL {:?}: {}", what, raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(BadgeError::InvalidConfig(format!(
            "{} URL {:?} cannot be used as a base",
            what, raw
        )));
    }
    Ok(url)
}
