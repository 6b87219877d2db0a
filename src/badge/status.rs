use serde::Serialize;
use std::fmt;

/// Semantic build outcome shown on a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Passing,
    Failing,
    Unstable,
    Aborted,
    Running,
    Unknown,
}

impl BuildStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Passing => "passing",
            BuildStatus::Failing => "failing",
            BuildStatus::Unstable => "unstable",
            BuildStatus::Aborted => "aborted",
            BuildStatus::Running => "running",
            BuildStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw Jenkins `result` token to a [`BuildStatus`].
///
/// Jenkins reports `result: null` while a build is still executing, so an
/// absent or empty token means the build is running.
pub fn normalize(raw: Option<&str>) -> BuildStatus {
    match raw {
        None | Some("") => BuildStatus::Running,
        Some("FAILURE") => BuildStatus::Failing,
        Some("SUCCESS") => BuildStatus::Passing,
        Some("UNSTABLE") => BuildStatus::Unstable,
        Some("ABORTED") => BuildStatus::Aborted,
        Some(_) => BuildStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tokens() {
        assert_eq!(normalize(Some("FAILURE")), BuildStatus::Failing);
        assert_eq!(normalize(Some("SUCCESS")), BuildStatus::Passing);
        assert_eq!(normalize(Some("UNSTABLE")), BuildStatus::Unstable);
        assert_eq!(normalize(Some("ABORTED")), BuildStatus::Aborted);
    }

    #[test]
    fn test_absent_or_empty_is_running() {
        assert_eq!(normalize(None), BuildStatus::Running);
        assert_eq!(normalize(Some("")), BuildStatus::Running);
    }

    #[test]
    fn test_unrecognised_token_is_unknown() {
        assert_eq!(normalize(Some("WEIRD")), BuildStatus::Unknown);
        // Tokens are case-sensitive
        assert_eq!(normalize(Some("success")), BuildStatus::Unknown);
        assert_eq!(normalize(Some("NOT_BUILT")), BuildStatus::Unknown);
    }

    #[test]
    fn test_display_and_serialize_lowercase() {
        assert_eq!(BuildStatus::Failing.to_string(), "failing");
        let json = serde_json::to_string(&BuildStatus::Unstable).expect("should serialize");
        assert_eq!(json, "\"unstable\"");
    }
}
