//! Structural checks over a dataset file.
//!
//! Works on raw JSON values rather than [`DatasetEntry`](super::DatasetEntry)
//! so that malformed entries are reported instead of failing deserialization.
//! Nothing is repaired.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// Non-numeric vector elements shown per entry.
const SAMPLE_LIMIT: usize = 5;

/// One thing wrong with a dataset entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
    MissingField { field: &'static str },
    NotAList { field: &'static str },
    WrongLength { actual: usize },
    NonNumeric { sample: Vec<Value>, truncated: bool },
    NotAnObject,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Missing '{field}'"),
            Self::NotAList { field } => write!(f, "'{field}' is not a list"),
            Self::WrongLength { actual } => write!(f, "Wrong vector length: {actual}"),
            Self::NonNumeric { sample, truncated } => {
                let items: Vec<String> = sample.iter().map(Value::to_string).collect();
                write!(f, "Non-numeric elements in vector: [{}]", items.join(", "))?;
                if *truncated {
                    f.write_str("...")?;
                }
                Ok(())
            }
            Self::NotAnObject => f.write_str("Entry is not an object"),
        }
    }
}

/// A bad entry: its position, its `id` if it had one, and what is wrong.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadEntry {
    pub index: usize,
    pub id: Option<Value>,
    pub problems: Vec<Problem>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub checked: usize,
    pub bad: Vec<BadEntry>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.bad.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bad vectors: {}", self.bad.len())?;
        for entry in &self.bad {
            let id = match &entry.id {
                None | Some(Value::Null) => "None".to_string(),
                Some(id) => id.to_string(),
            };
            let problems: Vec<String> = entry
                .problems
                .iter()
                .map(|p| quote_message(&p.to_string()))
                .collect();
            writeln!(
                f,
                "Index {}, id: {} - Problems: [{}]",
                entry.index,
                id,
                problems.join(", ")
            )?;
        }
        Ok(())
    }
}

/// Quote a problem message for the bracketed per-entry list: single quotes,
/// or double quotes when the message itself contains a single quote.
fn quote_message(msg: &str) -> String {
    if msg.contains('\'') && !msg.contains('"') {
        format!("\"{msg}\"")
    } else {
        format!("'{}'", msg.replace('\'', "\\'"))
    }
}

/// Check a single entry against the expected vector dimensionality.
///
/// Vector elements must be JSON numbers, integer or floating-point. JSON
/// booleans are not numbers and are reported as non-numeric, even though a
/// Python `isinstance(v, int)` check would let `true` through.
pub fn check_entry(entry: &Value, expected_dim: usize) -> Vec<Problem> {
    let Some(obj) = entry.as_object() else {
        return vec![Problem::NotAnObject];
    };

    let mut problems = Vec::new();
    if !obj.contains_key("id") {
        problems.push(Problem::MissingField { field: "id" });
    }

    match obj.get("vector") {
        None => problems.push(Problem::MissingField { field: "vector" }),
        Some(Value::Array(items)) => {
            if items.len() != expected_dim {
                problems.push(Problem::WrongLength {
                    actual: items.len(),
                });
            }
            let non_numeric: Vec<&Value> = items.iter().filter(|v| !v.is_number()).collect();
            if !non_numeric.is_empty() {
                problems.push(Problem::NonNumeric {
                    sample: non_numeric.iter().take(SAMPLE_LIMIT).map(|&v| v.clone()).collect(),
                    truncated: non_numeric.len() > SAMPLE_LIMIT,
                });
            }
        }
        Some(_) => problems.push(Problem::NotAList { field: "vector" }),
    }

    problems
}

pub fn validate_entries(entries: &[Value], expected_dim: usize) -> ValidationReport {
    let bad = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let problems = check_entry(entry, expected_dim);
            (!problems.is_empty()).then(|| BadEntry {
                index,
                id: entry.get("id").cloned(),
                problems,
            })
        })
        .collect();

    ValidationReport {
        checked: entries.len(),
        bad,
    }
}

/// Load a dataset file and check every entry.
///
/// Only a missing/unreadable file or a document that is not a JSON array is
/// an error; entry-level problems go in the report. A number beyond the `f64`
/// range (`1e400`) cannot be parsed and makes the whole file an error.
pub fn validate_dataset(path: &Path, expected_dim: usize) -> Result<ValidationReport> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset: {}", path.display()))?;
    let doc: Value = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse dataset JSON: {}", path.display()))?;
    let Value::Array(entries) = doc else {
        anyhow::bail!("dataset {} is not a JSON array", path.display());
    };

    let report = validate_entries(&entries, expected_dim);
    tracing::info!(
        path = %path.display(),
        checked = report.checked,
        bad = report.bad.len(),
        "dataset validated"
    );
    Ok(report)
}
