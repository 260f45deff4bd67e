use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A job posting. `equity` is a NUMERIC in [0,1]; it serializes as a decimal
/// string so precision survives the JSON round trip.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobCreate {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

/// Partial update: absent fields are left unchanged, explicit null clears a
/// nullable column. The id and owning company are immutable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub equity: Option<Option<BigDecimal>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_body_distinguishes_null_from_absent() {
        let update: JobUpdate = serde_json::from_str(r#"{ "salary": null }"#).unwrap();
        assert_eq!(update.salary, Some(None));
        assert!(update.equity.is_none());

        let update: JobUpdate =
            serde_json::from_str(r#"{ "equity": null, "salary": 90000 }"#).unwrap();
        assert_eq!(update.equity, Some(None));
        assert_eq!(update.salary, Some(Some(90000)));
    }
}
