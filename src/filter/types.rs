use serde_json::Value;

/// A SQL fragment plus the bind values its placeholders refer to.
///
/// Placeholder numbering starts at whatever index the caller asked for, so
/// fragments compose with surrounding parameterized SQL.
#[derive(Debug, Clone, Default)]
pub struct SqlFragment {
    pub clause: String,
    pub params: Vec<Value>,
}
