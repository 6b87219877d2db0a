//! Optional file-backed test results.
//!
//! Some jobs publish a JSON summary (aggregate plus per-service counts)
//! instead of build parameters. The document is checked against the
//! embedded schema before anything is read out of it.

use jsonschema::JSONSchema;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::BadgeError;

static RESULTS_SCHEMA: LazyLock<JSONSchema> = LazyLock::new(|| {
    let schema: Value = serde_json::from_str(include_str!("../../schemas/results.schema.json"))
        .expect("embedded results schema is valid JSON");
    JSONSchema::compile(&schema).expect("embedded results schema compiles")
});

/// One set of counts: either the aggregate or a single service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceResult {
    pub result: Option<String>,
    pub passed: u64,
    pub failed: u64,
    pub total: u64,
    /// Name of the service these counts belong to; `None` for the aggregate.
    #[serde(skip)]
    pub service: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedServiceResult {
    pub name: String,
    #[serde(flatten)]
    pub counts: ServiceResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultsDocument {
    #[serde(flatten)]
    pub aggregate: ServiceResult,
    #[serde(default)]
    pub services: Vec<NamedServiceResult>,
}

impl ResultsDocument {
    /// Exact-name lookup; an unknown or absent name yields the aggregate.
    pub fn select(self, service: Option<&str>) -> ServiceResult {
        let Some(name) = service else {
            return self.aggregate;
        };
        match self.services.into_iter().find(|s| s.name == name) {
            Some(found) => ServiceResult {
                service: Some(found.name),
                ..found.counts
            },
            None => {
                debug!("Service {:?} not in results file, using aggregate", name);
                self.aggregate
            }
        }
    }
}

/// Check a parsed document against the results schema.
pub fn validate(doc: &Value) -> Result<(), BadgeError> {
    RESULTS_SCHEMA.validate(doc).map_err(|errors| {
        let msgs: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        BadgeError::ResultsFileInvalid(msgs.join("; "))
    })
}

/// Parse and validate a results document. A document that fails the schema
/// yields `Ok(None)`, never a partially read result.
pub fn parse_results(text: &str, service: Option<&str>) -> Result<Option<ServiceResult>, BadgeError> {
    let doc: Value =
        serde_json::from_str(text).map_err(|e| BadgeError::ResultsFileParse(e.to_string()))?;

    if let Err(e) = validate(&doc) {
        warn!("{}", e);
        return Ok(None);
    }

    match serde_json::from_value::<ResultsDocument>(doc) {
        Ok(parsed) => Ok(Some(parsed.select(service))),
        Err(e) => {
            warn!("Results file rejected: {}", e);
            Ok(None)
        }
    }
}

/// Read the results file at `path`, scoped to `service` when given.
pub fn read_results(path: &Path, service: Option<&str>) -> Result<Option<ServiceResult>, BadgeError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BadgeError::ResultsFileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(BadgeError::Io(e)),
    };
    parse_results(&text, service)
}
