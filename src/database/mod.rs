pub mod bind;
pub mod models;
pub mod pool;
pub mod update;

pub use pool::DatabaseError;
pub use update::{build_set_clause, SetClause, UpdateError};
