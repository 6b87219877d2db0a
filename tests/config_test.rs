mod common;

use jenkins_badges::config::*;
use jenkins_badges::error::BadgeError;
use jenkins_badges::settings::PersistentSettings;

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["jenkins-badges"];
    argv.extend_from_slice(extra);
    common::parse_args(argv)
}

#[test]
fn test_defaults() {
    let config = BadgeConfig::merge(
        args(&["--jenkins-url", "http://localhost:8080"]),
        PersistentSettings::default(),
    )
    .unwrap();

    assert_eq!(config.jenkins_url.as_str(), "http://localhost:8080/");
    assert_eq!(config.shields_url.as_str(), DEFAULT_SHIELDS_URL);
    assert_eq!(config.thresholds.yellow, DEFAULT_YELLOW_THRESHOLD);
    assert_eq!(config.thresholds.red, DEFAULT_RED_THRESHOLD);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.bind, DEFAULT_BIND);
    assert_eq!(config.request_timeout.as_secs(), DEFAULT_REQUEST_TIMEOUT_SECS);
    assert!(config.results_file.is_none());
}

#[test]
fn test_jenkins_url_is_required() {
    let err = BadgeConfig::merge(args(&[]), PersistentSettings::default()).unwrap_err();
    assert!(matches!(err, BadgeError::InvalidConfig(_)));
}

#[test]
fn test_ambient_env_does_not_reach_args() {
    let previous = {
        let _lock = common::ENV_LOCK.lock().unwrap();
        let previous = std::env::var_os("JENKINS_BASE_URL");
        std::env::set_var("JENKINS_BASE_URL", "http://ambient:8080");
        previous
    };
    let _restore = scopeguard::guard(previous, |previous| {
        let _lock = common::ENV_LOCK.lock().unwrap();
        match previous {
            Some(v) => std::env::set_var("JENKINS_BASE_URL", v),
            None => std::env::remove_var("JENKINS_BASE_URL"),
        }
    });

    let parsed = args(&[]);
    assert!(parsed.jenkins_url.is_none());
    // The variable is put back once parsing is done
    let after = {
        let _lock = common::ENV_LOCK.lock().unwrap();
        std::env::var("JENKINS_BASE_URL").ok()
    };
    assert_eq!(after.as_deref(), Some("http://ambient:8080"));
}

#[test]
fn test_log_dir_stays_on_cli_args() {
    let parsed = args(&["--jenkins-url", "http://localhost:8080", "--log-dir", "/var/log/badges"]);
    assert_eq!(
        parsed.log_dir.as_deref(),
        Some(std::path::Path::new("/var/log/badges"))
    );
}

#[test]
fn test_cli_wins_over_settings_file() {
    let settings = PersistentSettings {
        jenkins_url: Some("http://from-file:8080".to_string()),
        yellow_threshold: Some(0.9),
        red_threshold: Some(0.6),
        port: Some(7000),
        ..Default::default()
    };
    let config = BadgeConfig::merge(
        args(&["--jenkins-url", "http://from-cli:8080", "--red-threshold", "0.3"]),
        settings,
    )
    .unwrap();

    assert_eq!(config.jenkins_url.host_str(), Some("from-cli"));
    assert_eq!(config.thresholds.yellow, 0.9);
    assert_eq!(config.thresholds.red, 0.3);
    assert_eq!(config.port, 7000);
}

#[test]
fn test_thresholds_must_be_distinct_and_ordered() {
    for (yellow, red) in [("0.5", "0.5"), ("0.4", "0.6"), ("1.5", "0.5")] {
        let err = BadgeConfig::merge(
            args(&[
                "--jenkins-url",
                "http://localhost:8080",
                "--yellow-threshold",
                yellow,
                "--red-threshold",
                red,
            ]),
            PersistentSettings::default(),
        )
        .unwrap_err();
        assert!(
            matches!(err, BadgeError::InvalidConfig(_)),
            "yellow={} red={} should be rejected",
            yellow,
            red
        );
    }
}

#[test]
fn test_credentials() {
    let anonymous = BadgeConfig::merge(
        args(&["--jenkins-url", "http://localhost:8080"]),
        PersistentSettings::default(),
    )
    .unwrap();
    assert!(anonymous.credentials().is_none());

    let authed = BadgeConfig::merge(
        args(&[
            "--jenkins-url",
            "http://localhost:8080",
            "--username",
            "admin",
            "--token",
            "secret",
        ]),
        PersistentSettings::default(),
    )
    .unwrap();
    assert_eq!(authed.credentials(), Some(("admin", Some("secret"))));
}

#[test]
fn test_parse_base_url() {
    let url = parse_base_url("Jenkins", "https://ci.example.com/jenkins").unwrap();
    assert_eq!(url.as_str(), "https://ci.example.com/jenkins/");

    assert!(parse_base_url("Jenkins", "not a url").is_err());
    assert!(parse_base_url("Jenkins", "mailto:someone@example.com").is_err());
}
