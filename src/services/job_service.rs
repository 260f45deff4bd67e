use bigdecimal::BigDecimal;
use serde_json::{Map, Value};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::database::bind::bind_value_as;
use crate::database::models::{Job, JobCreate, JobUpdate};
use crate::database::update::{build_set_clause, UpdateError};
use crate::database::pool;
use crate::error::ApiError;
use crate::filter::JobFilter;

const COLUMNS: &str = "id, title, salary, equity, company_handle";

/// SQL parts for a partial job update. Equity is carried as a typed decimal
/// parameter, not through the JSON value list, so the stored value never
/// takes a float round trip.
#[derive(Debug)]
struct JobUpdateSql {
    assignments: String,
    values: Vec<Value>,
    equity: Option<BigDecimal>,
    next_index: usize,
}

pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub async fn new() -> Result<Self, ApiError> {
        Ok(Self {
            pool: pool::pool().await?,
        })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn update_columns() -> HashMap<&'static str, &'static str> {
        // Logical and physical names already match for every mutable column
        HashMap::new()
    }

    fn validate_equity(equity: &BigDecimal) -> Result<(), ApiError> {
        if *equity < BigDecimal::from(0) || *equity > BigDecimal::from(1) {
            return Err(ApiError::bad_request("equity must be between 0 and 1"));
        }
        Ok(())
    }

    /// Create a job. The owning-company lookup takes a row lock, so
    /// concurrent creates for the same company serialize and the duplicate
    /// (title, companyHandle) check that follows is reliable.
    pub async fn create(&self, data: JobCreate) -> Result<Job, ApiError> {
        if let Some(equity) = &data.equity {
            Self::validate_equity(equity)?;
        }

        let mut tx = self.pool.begin().await?;

        let company: Option<(String,)> =
            sqlx::query_as("SELECT handle FROM companies WHERE handle = $1 FOR UPDATE")
                .bind(&data.company_handle)
                .fetch_optional(&mut *tx)
                .await?;
        if company.is_none() {
            return Err(ApiError::bad_request(format!(
                "Company does not exist: {}",
                data.company_handle
            )));
        }

        let duplicate: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM jobs WHERE title = $1 AND company_handle = $2")
                .bind(&data.title)
                .bind(&data.company_handle)
                .fetch_optional(&mut *tx)
                .await?;
        if duplicate.is_some() {
            return Err(ApiError::bad_request(format!(
                "Job already exists: {} at {}",
                data.title, data.company_handle
            )));
        }

        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        );
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(&data.title)
            .bind(data.salary)
            .bind(&data.equity)
            .bind(&data.company_handle)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(job)
    }

    /// List jobs, optionally filtered, ordered by salary.
    pub async fn find_all(&self, filter: &JobFilter) -> Result<Vec<Job>, ApiError> {
        let (where_clause, params) = match filter.to_where_sql(1)? {
            Some(f) => (f.clause, f.params),
            None => (String::new(), Vec::new()),
        };

        let sql = format!(
            "SELECT {} FROM jobs {} ORDER BY salary, id",
            COLUMNS, where_clause
        );
        let mut query = sqlx::query_as::<_, Job>(&sql);
        for param in params.iter() {
            query = bind_value_as(query, param);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Get one job by id.
    pub async fn get(&self, id: i32) -> Result<Job, ApiError> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", COLUMNS);
        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("No job: {}", id)))
    }

    fn update_sql_parts(data: JobUpdate) -> Result<JobUpdateSql, ApiError> {
        let mut fields = Map::new();
        if let Some(title) = data.title {
            fields.insert("title".to_string(), Value::String(title));
        }
        if let Some(salary) = data.salary {
            fields.insert(
                "salary".to_string(),
                salary.map(Value::from).unwrap_or(Value::Null),
            );
        }

        if let Some(Some(equity)) = &data.equity {
            Self::validate_equity(equity)?;
        }

        let (mut assignments, values, mut next_index) = if fields.is_empty() {
            if data.equity.is_none() {
                return Err(UpdateError::EmptyUpdate.into());
            }
            (String::new(), Vec::new(), 1)
        } else {
            let set = build_set_clause(&fields, &Self::update_columns())?;
            (set.assignments, set.values, set.next_index)
        };

        let mut equity = None;
        match data.equity {
            Some(Some(value)) => {
                let piece = format!("\"equity\"=${}", next_index);
                next_index += 1;
                if assignments.is_empty() {
                    assignments = piece;
                } else {
                    assignments = format!("{}, {}", assignments, piece);
                }
                equity = Some(value);
            }
            Some(None) => {
                if assignments.is_empty() {
                    assignments = "\"equity\"=NULL".to_string();
                } else {
                    assignments = format!("{}, \"equity\"=NULL", assignments);
                }
            }
            None => {}
        }

        Ok(JobUpdateSql {
            assignments,
            values,
            equity,
            next_index,
        })
    }

    /// Partially update a job. Id and owning company are immutable; an
    /// explicit null clears salary or equity.
    pub async fn update(&self, id: i32, data: JobUpdate) -> Result<Job, ApiError> {
        let parts = Self::update_sql_parts(data)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            parts.assignments, parts.next_index, COLUMNS
        );

        let mut query = sqlx::query_as::<_, Job>(&sql);
        for param in parts.values.iter() {
            query = bind_value_as(query, param);
        }
        if let Some(equity) = &parts.equity {
            query = query.bind(equity);
        }

        query
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("No job: {}", id)))
    }

    /// Delete a job by id.
    pub async fn remove(&self, id: i32) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found(format!("No job: {}", id)));
        }
        Ok(())
    }
}
