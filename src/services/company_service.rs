use serde_json::{Map, Value};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::database::bind::bind_value_as;
use crate::database::models::{Company, CompanyCreate, CompanyUpdate, CompanyWithJobs, Job};
use crate::database::update::build_set_clause;
use crate::database::pool;
use crate::error::ApiError;
use crate::filter::CompanyFilter;

const COLUMNS: &str = "handle, name, description, num_employees, logo_url";

pub struct CompanyService {
    pool: PgPool,
}

impl CompanyService {
    pub async fn new() -> Result<Self, ApiError> {
        Ok(Self {
            pool: pool::pool().await?,
        })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn update_columns() -> HashMap<&'static str, &'static str> {
        HashMap::from([("numEmployees", "num_employees"), ("logoUrl", "logo_url")])
    }

    /// Create a company. The duplicate-handle check and the insert run inside
    /// one transaction so concurrent creates cannot both pass the check.
    pub async fn create(&self, data: CompanyCreate) -> Result<Company, ApiError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(String,)> =
            sqlx::query_as("SELECT handle FROM companies WHERE handle = $1")
                .bind(&data.handle)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_some() {
            return Err(ApiError::bad_request(format!(
                "Company already exists: {}",
                data.handle
            )));
        }

        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COLUMNS
        );
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(&data.handle)
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.num_employees)
            .bind(&data.logo_url)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(company)
    }

    /// List companies, optionally filtered, ordered by name.
    pub async fn find_all(&self, filter: &CompanyFilter) -> Result<Vec<Company>, ApiError> {
        let fragment = filter.to_where_sql(1)?;
        let (where_clause, params) = match fragment {
            Some(f) => (f.clause, f.params),
            None => (String::new(), Vec::new()),
        };

        let sql = format!(
            "SELECT {} FROM companies {} ORDER BY name",
            COLUMNS, where_clause
        );
        let mut query = sqlx::query_as::<_, Company>(&sql);
        for param in params.iter() {
            query = bind_value_as(query, param);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Get one company by handle, with its jobs.
    pub async fn get(&self, handle: &str) -> Result<CompanyWithJobs, ApiError> {
        let sql = format!("SELECT {} FROM companies WHERE handle = $1", COLUMNS);
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("No company: {}", handle)))?;

        let jobs = sqlx::query_as::<_, Job>(
            "SELECT id, title, salary, equity, company_handle \
             FROM jobs WHERE company_handle = $1 ORDER BY salary, id",
        )
        .bind(handle)
        .fetch_all(&self.pool)
        .await?;

        Ok(CompanyWithJobs { company, jobs })
    }

    /// Partially update a company. The handle is immutable; only the fields
    /// present in `data` change, and an explicit null clears a nullable
    /// column.
    pub async fn update(&self, handle: &str, data: CompanyUpdate) -> Result<Company, ApiError> {
        let mut fields = Map::new();
        if let Some(name) = data.name {
            fields.insert("name".to_string(), Value::String(name));
        }
        if let Some(description) = data.description {
            fields.insert("description".to_string(), Value::String(description));
        }
        if let Some(num_employees) = data.num_employees {
            fields.insert(
                "numEmployees".to_string(),
                num_employees.map(Value::from).unwrap_or(Value::Null),
            );
        }
        if let Some(logo_url) = data.logo_url {
            fields.insert(
                "logoUrl".to_string(),
                logo_url.map(Value::String).unwrap_or(Value::Null),
            );
        }

        let set = build_set_clause(&fields, &Self::update_columns())?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
            set.assignments, set.next_index, COLUMNS
        );

        let mut query = sqlx::query_as::<_, Company>(&sql);
        for param in set.values.iter() {
            query = bind_value_as(query, param);
        }

        query
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("No company: {}", handle)))
    }

    /// Delete a company by handle.
    pub async fn remove(&self, handle: &str) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
            .bind(handle)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found(format!("No company: {}", handle)));
        }
        Ok(())
    }
}
