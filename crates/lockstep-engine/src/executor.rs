//! Statement execution against a working copy
//!
//! Runs one statement against the local database file and classifies its
//! effect by the prepared statement's column count: a statement that
//! produces result columns yields rows, anything else yields an
//! affected-row count. Classification never inspects the statement text,
//! so comments, leading whitespace, mixed case, `WITH` chains, and
//! `RETURNING` clauses all land in the right category.

#![allow(clippy::result_large_err)]

use std::path::Path;

use lockstep_core::model::Row;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde_json::Value;

use crate::errors::{execution_error, Result};

/// Effect of one executed statement
#[derive(Debug, Clone, PartialEq)]
pub enum StatementOutput {
    /// Row-producing statement: rows of column name to value, in statement
    /// column order and engine row order
    Rows(Vec<Row>),
    /// Mutating statement: number of rows affected
    Affected(u64),
}

/// Run one statement against the database at `db_path`
///
/// # Errors
///
/// Returns `LsErrorKind::Execution` carrying the engine's message when the
/// statement fails to prepare or run.
pub fn execute_statement(db_path: &Path, statement: &str) -> Result<StatementOutput> {
    let conn = Connection::open(db_path).map_err(execution_error)?;
    let mut stmt = conn.prepare(statement).map_err(execution_error)?;

    if stmt.column_count() > 0 {
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let mut rows = stmt.query([]).map_err(execution_error)?;
        let mut collected = Vec::new();
        while let Some(row) = rows.next().map_err(execution_error)? {
            let mut out = Row::new();
            for (idx, column) in columns.iter().enumerate() {
                let value = row.get_ref(idx).map_err(execution_error)?;
                out.insert(column.clone(), value_to_json(value));
            }
            collected.push(out);
        }
        Ok(StatementOutput::Rows(collected))
    } else {
        let affected = stmt.execute([]).map_err(execution_error)?;
        Ok(StatementOutput::Affected(affected as u64))
    }
}

/// Map one engine value to its JSON rendering:
/// NULL → null, INTEGER/REAL → number, TEXT → string, BLOB → base64 string.
fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::from(n),
        ValueRef::Real(f) => Value::from(f),
        ValueRef::Text(bytes) => Value::from(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::from(base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            bytes,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_value_mapping() {
        assert_eq!(value_to_json(ValueRef::Null), Value::Null);
        assert_eq!(value_to_json(ValueRef::Integer(42)), Value::from(42));
        assert_eq!(value_to_json(ValueRef::Real(1.5)), Value::from(1.5));
        assert_eq!(value_to_json(ValueRef::Text(b"hello")), Value::from("hello"));
    }

    #[test]
    fn test_blob_maps_to_base64() {
        let mapped = value_to_json(ValueRef::Blob(&[0xDE, 0xAD, 0xBE, 0xEF]));
        assert_eq!(mapped, Value::from("3q2+7w=="));
    }
}
