use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unsatisfiable range: minEmployees {min} exceeds maxEmployees {max}")]
    UnsatisfiableRange { min: i32, max: i32 },
}
