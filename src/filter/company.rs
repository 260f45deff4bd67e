//! Company list filters.
//!
//! Every filter value is passed as a bound parameter. The WHERE text only
//! ever contains column names and placeholders.

use serde::Deserialize;
use serde_json::Value;

use super::error::FilterError;
use super::types::SqlFragment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    /// Case-insensitive substring match on name
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Build the WHERE fragment, with placeholders starting at
    /// `starting_index`. Returns `None` when no filters are present.
    pub fn to_where_sql(&self, starting_index: usize) -> Result<Option<SqlFragment>, FilterError> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if max < min {
                return Err(FilterError::UnsatisfiableRange { min, max });
            }
        }

        let mut conditions = Vec::new();
        let mut params = Vec::new();
        let mut index = starting_index;

        if let Some(name) = &self.name {
            conditions.push(format!("\"name\" ILIKE ${}", index));
            params.push(Value::String(format!("%{}%", name)));
            index += 1;
        }
        if let Some(min) = self.min_employees {
            conditions.push(format!("\"num_employees\" >= ${}", index));
            params.push(Value::from(min));
            index += 1;
        }
        if let Some(max) = self.max_employees {
            conditions.push(format!("\"num_employees\" <= ${}", index));
            params.push(Value::from(max));
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_filters_yields_no_fragment() {
        let filter = CompanyFilter::default();
        assert!(filter.to_where_sql(1).unwrap().is_none());
    }

    #[test]
    fn name_filter_binds_wrapped_pattern() {
        let filter = CompanyFilter {
            name: Some("net".to_string()),
            ..Default::default()
        };

        let fragment = filter.to_where_sql(1).unwrap().unwrap();
        assert_eq!(fragment.clause, "WHERE \"name\" ILIKE $1");
        assert_eq!(fragment.params, vec![json!("%net%")]);
    }

    #[test]
    fn quotes_in_name_stay_out_of_the_sql_text() {
        let filter = CompanyFilter {
            name: Some("o'reilly; DROP TABLE companies".to_string()),
            ..Default::default()
        };

        let fragment = filter.to_where_sql(1).unwrap().unwrap();
        assert!(!fragment.clause.contains("reilly"));
        assert_eq!(fragment.params.len(), 1);
    }

    #[test]
    fn all_filters_combine_with_and() {
        let filter = CompanyFilter {
            name: Some("net".to_string()),
            min_employees: Some(10),
            max_employees: Some(500),
        };

        let fragment = filter.to_where_sql(1).unwrap().unwrap();
        assert_eq!(
            fragment.clause,
            "WHERE \"name\" ILIKE $1 AND \"num_employees\" >= $2 AND \"num_employees\" <= $3"
        );
        assert_eq!(fragment.params, vec![json!("%net%"), json!(10), json!(500)]);
    }

    #[test]
    fn placeholders_start_at_requested_index() {
        let filter = CompanyFilter {
            min_employees: Some(3),
            ..Default::default()
        };

        let fragment = filter.to_where_sql(4).unwrap().unwrap();
        assert_eq!(fragment.clause, "WHERE \"num_employees\" >= $4");
    }

    #[test]
    fn inverted_range_is_rejected_before_querying() {
        let filter = CompanyFilter {
            min_employees: Some(5),
            max_employees: Some(1),
            ..Default::default()
        };

        let err = filter.to_where_sql(1).unwrap_err();
        assert!(matches!(
            err,
            FilterError::UnsatisfiableRange { min: 5, max: 1 }
        ));
    }

    #[test]
    fn equal_bounds_are_satisfiable() {
        let filter = CompanyFilter {
            min_employees: Some(7),
            max_employees: Some(7),
            ..Default::default()
        };

        assert!(filter.to_where_sql(1).is_ok());
    }
}
