//! Data model shared between the client and the backend contract.

mod employee;
mod role;

pub use employee::EmployeeRecord;
pub use role::{Gender, Role};
