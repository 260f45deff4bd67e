use serde::{Deserialize, Deserializer};

pub mod company;
pub mod job;

pub use company::{Company, CompanyCreate, CompanyUpdate, CompanyWithJobs};
pub use job::{Job, JobCreate, JobUpdate};

/// Distinguishes an absent PATCH field from an explicit JSON null:
/// absent -> None (via `serde(default)`), null -> Some(None),
/// value -> Some(Some(v)). Plain `Option<Option<T>>` collapses null into the
/// outer None, so nullable columns could never be cleared without this.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
