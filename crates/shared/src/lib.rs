pub mod domain;
pub mod error;
pub mod protocol;

pub use domain::{Employee, EmployeeStatus, PersonId};
pub use error::DomainError;
