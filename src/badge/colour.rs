use serde::Serialize;
use std::fmt;

use super::status::BuildStatus;

/// Shields colour names used on test badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Red,
    Yellow,
    BrightGreen,
    Blue,
    LightGrey,
}

impl Colour {
    pub fn as_str(&self) -> &'static str {
        match self {
            Colour::Red => "red",
            Colour::Yellow => "yellow",
            Colour::BrightGreen => "brightgreen",
            Colour::Blue => "blue",
            Colour::LightGrey => "lightgrey",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pass-ratio cut-offs. `red < yellow` is checked when config is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub yellow: f64,
    pub red: f64,
}

/// Pass ratio rounded to two decimals, or `None` when there are no tests.
pub fn pass_ratio(passed: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let ratio = passed as f64 / total as f64;
    Some((ratio * 100.0).round() / 100.0)
}

/// Pick a badge colour. With a ratio the thresholds decide, otherwise the
/// status alone does.
pub fn classify(status: BuildStatus, ratio: Option<f64>, thresholds: &Thresholds) -> Colour {
    match ratio {
        Some(ratio) => classify_ratio(ratio, thresholds),
        None => classify_status(status),
    }
}

pub fn classify_status(status: BuildStatus) -> Colour {
    match status {
        BuildStatus::Failing => Colour::Red,
        BuildStatus::Unstable => Colour::Yellow,
        BuildStatus::Passing => Colour::BrightGreen,
        BuildStatus::Running => Colour::Blue,
        BuildStatus::Aborted | BuildStatus::Unknown => Colour::LightGrey,
    }
}

/// Both bounds of the yellow band are inclusive.
pub fn classify_ratio(ratio: f64, thresholds: &Thresholds) -> Colour {
    if ratio > thresholds.yellow {
        Colour::BrightGreen
    } else if ratio >= thresholds.red {
        Colour::Yellow
    } else {
        Colour::Red
    }
}
