//! Build record model and test-count extraction.
//!
//! Jenkins build records are loosely shaped: `actions` mixes plugin-specific
//! objects, empty `{}` entries and the occasional `null`. The record is read
//! leniently so a misshapen field degrades to "absent" instead of failing the
//! whole badge.

use serde_json::Value;

/// Parameter holding the number of passed tests. The spelling matches what
/// the pipelines publish.
pub const PASSED_PARAM: &str = "NUM_TESTS_SUCCEDED";
/// Parameter holding the total number of tests.
pub const TOTAL_PARAM: &str = "TOT_TESTS";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildRecord {
    pub result: Option<String>,
    pub actions: Vec<BuildAction>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildAction {
    pub parameters: Vec<BuildParameter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildParameter {
    pub name: String,
    pub value: Value,
}

impl BuildRecord {
    /// Build a record from a `lastBuild/api/json` document. Never fails.
    pub fn from_json(doc: &Value) -> Self {
        let result = doc
            .get("result")
            .and_then(Value::as_str)
            .map(str::to_string);

        let actions = doc
            .get("actions")
            .and_then(Value::as_array)
            .map(|actions| actions.iter().map(BuildAction::from_json).collect())
            .unwrap_or_default();

        BuildRecord { result, actions }
    }
}

impl BuildAction {
    fn from_json(action: &Value) -> Self {
        let parameters = action
            .get("parameters")
            .and_then(Value::as_array)
            .map(|params| {
                params
                    .iter()
                    .filter_map(|p| {
                        let name = p.get("name")?.as_str()?.to_string();
                        let value = p.get("value").cloned().unwrap_or(Value::Null);
                        Some(BuildParameter { name, value })
                    })
                    .collect()
            })
            .unwrap_or_default();

        BuildAction { parameters }
    }
}

/// Scan every action's parameters for the passed/total counters.
///
/// The first occurrence of each name in source order wins. Missing or
/// malformed values count as zero.
pub fn extract(record: &BuildRecord) -> (u64, u64) {
    let mut passed: Option<&Value> = None;
    let mut total: Option<&Value> = None;

    for param in record.actions.iter().flat_map(|a| a.parameters.iter()) {
        match param.name.as_str() {
            PASSED_PARAM if passed.is_none() => passed = Some(&param.value),
            TOTAL_PARAM if total.is_none() => total = Some(&param.value),
            _ => {}
        }
        if passed.is_some() && total.is_some() {
            break;
        }
    }

    (
        passed.map(coerce_count).unwrap_or(0),
        total.map(coerce_count).unwrap_or(0),
    )
}

/// Coerce an opaque parameter value to a non-negative count.
pub fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u
            } else if let Some(f) = n.as_f64() {
                if f.is_finite() && f > 0.0 {
                    f.trunc() as u64
                } else {
                    0
                }
            } else {
                0
            }
        }
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}
