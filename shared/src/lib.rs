//! Shared types for Staffline
//!
//! Common types used by the client and the mock backend: the employee data
//! model, API request/response DTOs, and the backend error payload model.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::ErrorBody;
pub use models::{EmployeeRecord, Gender, Role};
