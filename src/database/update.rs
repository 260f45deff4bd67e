//! Partial-update SET clause construction.
//!
//! Shared by every entity's `update`: callers pass only the fields they want
//! changed, plus a map from API field names to physical column names, and get
//! back a parameterized assignment list with the bind values in placeholder
//! order. Values are never interpolated into the SQL text.

use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("No fields to update")]
    EmptyUpdate,
}

/// A parameterized `SET` fragment.
///
/// `next_index` is the first unused placeholder index, so the caller can
/// append trailing binds (typically the WHERE identifier) without clashing.
#[derive(Debug, Clone)]
pub struct SetClause {
    pub assignments: String,
    pub values: Vec<Value>,
    pub next_index: usize,
}

/// Build `"col1"=$1, "col2"=$2, ...` from a partial field map.
///
/// Field names with no entry in `columns` are used verbatim as column names.
/// Placeholders are 1-based and follow the iteration order of `fields`.
///
/// An explicit JSON null clears the column. A bound placeholder must carry a
/// concrete Postgres type and a column-agnostic NULL has none, so null
/// assignments are emitted as the constant `NULL` and get no placeholder.
pub fn build_set_clause(
    fields: &Map<String, Value>,
    columns: &HashMap<&str, &str>,
) -> Result<SetClause, UpdateError> {
    if fields.is_empty() {
        return Err(UpdateError::EmptyUpdate);
    }

    let mut assignments = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());
    let mut index = 0;

    for (name, value) in fields.iter() {
        let column = columns.get(name.as_str()).copied().unwrap_or(name.as_str());
        if value.is_null() {
            assignments.push(format!("\"{}\"=NULL", column));
        } else {
            index += 1;
            assignments.push(format!("\"{}\"=${}", column, index));
            values.push(value.clone());
        }
    }

    Ok(SetClause {
        assignments: assignments.join(", "),
        values,
        next_index: index + 1,
    })
}
