pub mod company_service;
pub mod job_service;

pub use company_service::CompanyService;
pub use job_service::JobService;
