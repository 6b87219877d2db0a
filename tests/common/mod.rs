//! Shared helpers for the integration tests.

use clap::Parser;
use jenkins_badges::config::CliArgs;
use std::ffi::OsString;
use std::sync::Mutex;

/// Variables `CliArgs` falls back to when a flag is absent.
const CLI_ENV_VARS: [&str; 3] = ["JENKINS_BASE_URL", "JENKINS_USERNAME", "JENKINS_TOKEN"];

/// Held by anything in the test binary that reads or writes the process environment.
#[allow(dead_code)]
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Parse `argv` with the `JENKINS_*` variables cleared, so only the flags in
/// `argv` reach the config. The caller's environment is put back afterwards.
pub fn parse_args<I, T>(argv: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<OsString>)> = CLI_ENV_VARS
        .iter()
        .map(|name| (*name, std::env::var_os(name)))
        .collect();
    let _restore = scopeguard::guard(saved, |saved| {
        for (name, value) in saved {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    });
    for name in CLI_ENV_VARS {
        std::env::remove_var(name);
    }
    CliArgs::parse_from(argv)
}
