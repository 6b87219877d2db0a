use serde::Serialize;
use url::Url;

use super::colour::{classify, pass_ratio, Colour, Thresholds};
use super::status::BuildStatus;

pub const BADGE_LABEL: &str = "tests";

/// Normalised outcome of one build, whichever source it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSummary {
    pub status: BuildStatus,
    pub passed: u64,
    pub total: u64,
    pub service: Option<String>,
}

impl TestSummary {
    /// Passed is clamped to total whenever a total is known.
    pub fn new(status: BuildStatus, passed: u64, total: u64, service: Option<String>) -> Self {
        let passed = if total > 0 { passed.min(total) } else { passed };
        Self {
            status,
            passed,
            total,
            service,
        }
    }

    /// Fraction badges are only drawn for finished builds that reported tests.
    pub fn shows_fraction(&self) -> bool {
        matches!(self.status, BuildStatus::Passing | BuildStatus::Failing) && self.total != 0
    }
}

/// Everything the badge renderer needs for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeSpec {
    pub label: &'static str,
    pub value: String,
    pub colour: Colour,
}

pub fn compose(summary: &TestSummary, thresholds: &Thresholds) -> BadgeSpec {
    let ratio = if summary.shows_fraction() {
        pass_ratio(summary.passed, summary.total)
    } else {
        None
    };

    let value = match ratio {
        Some(_) => format!("{} / {}", summary.passed, summary.total),
        None => summary.status.to_string(),
    };
    BadgeSpec {
        label: BADGE_LABEL,
        value,
        colour: classify(summary.status, ratio, thresholds),
    }
}

impl BadgeSpec {
    /// Image path understood by shields: `tests-<value>-<colour>.svg`.
    pub fn file_name(&self) -> String {
        format!("{}-{}-{}.svg", self.label, self.value, self.colour)
    }

    /// Full image URL under the badge service base. The file name is pushed
    /// as a single path segment so spaces and `/` in the value are escaped.
    pub fn image_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.file_name());
        }
        url
    }
}
