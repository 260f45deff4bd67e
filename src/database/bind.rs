//! Binding of JSON-typed parameter lists onto sqlx queries.
//!
//! The set-clause and filter builders emit SQL with `$n` placeholders plus an
//! ordered `Vec<serde_json::Value>`; this helper attaches those values to a
//! query in the same order so placeholder indices line up.

use serde_json::Value;
use sqlx::{self, postgres::PgArguments, FromRow};

pub fn bind_value_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            // The builders inline NULL assignments rather than binding them,
            // so this arm is a backstop. It carries the text OID and would
            // not satisfy an integer or numeric column.
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                // Postgres doesn't have u64; cast down if safe
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        // Composite values never come out of the builders; bind their text form
        Value::Array(_) | Value::Object(_) => q.bind(v.to_string()),
    }
}
