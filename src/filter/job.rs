//! Job list filters.

use serde::Deserialize;
use serde_json::Value;

use super::error::FilterError;
use super::types::SqlFragment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    /// Case-insensitive substring match on title
    pub title: Option<String>,
    /// Strict lower bound: salary > minSalary
    pub min_salary: Option<i32>,
    /// true restricts to jobs with non-null, positive equity;
    /// false or absent applies no equity restriction
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// Build the WHERE fragment, with placeholders starting at
    /// `starting_index`. Returns `Ok(None)` when no filters are present.
    /// No job filter combination is currently invalid, but the contract
    /// matches `CompanyFilter` so handler code treats both alike.
    pub fn to_where_sql(&self, starting_index: usize) -> Result<Option<SqlFragment>, FilterError> {
        let mut conditions = Vec::new();
        let mut params = Vec::new();
        let mut index = starting_index;

        if let Some(title) = &self.title {
            conditions.push(format!("\"title\" ILIKE ${}", index));
            params.push(Value::String(format!("%{}%", title)));
            index += 1;
        }
        if let Some(min_salary) = self.min_salary {
            conditions.push(format!("\"salary\" > ${}", index));
            params.push(Value::from(min_salary));
        }
        if self.has_equity == Some(true) {
            // Constant predicate, no caller data involved
            conditions.push("\"equity\" IS NOT NULL AND \"equity\" > 0".to_string());
        }

        if conditions.is_empty() {
            return Ok(None);
        }

        Ok(Some(SqlFragment {
            clause: format!("WHERE {}", conditions.join(" AND ")),
            params,
        }))
    }
}
