//! Strongly typed identifiers shared across models, store and services.

mod id;

pub use id::{CompanyId, EmployeeId, VacationRequestId};
