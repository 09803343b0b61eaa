use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::LsError;

/// One row of a row-producing statement: column name to value, in the
/// column order the engine produced
pub type Row = Map<String, Value>;

/// The operation result envelope returned to the caller
///
/// Exactly one of `rows` / `affected` is present on success, matching the
/// statement's effect category; both are absent on failure. Absent fields
/// are omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationResult {
    /// Successful row-producing statement
    pub fn success_rows(rows: Vec<Row>) -> Self {
        let message = format!("returned {} row(s)", rows.len());
        Self {
            success: true,
            rows: Some(rows),
            affected: None,
            message: Some(message),
            error: None,
        }
    }

    /// Successful mutating statement
    pub fn success_affected(affected: u64) -> Self {
        Self {
            success: true,
            rows: None,
            affected: Some(affected),
            message: Some(format!("{} row(s) affected", affected)),
            error: None,
        }
    }

    /// Failure envelope for an error that crossed the component boundary
    ///
    /// Carries the stable error code in `error` and the human-readable
    /// rendering in `message`.
    pub fn failure(err: &LsError) -> Self {
        Self {
            success: false,
            rows: None,
            affected: None,
            message: Some(err.to_string()),
            error: Some(err.code().to_string()),
        }
    }

    /// HTTP status for this result (success maps to 200)
    pub fn http_status_for(err: Option<&LsError>) -> u16 {
        match err {
            None => 200,
            Some(e) => e.http_status(),
        }
    }
}
