//! Staffline Client - typed client for the employee-management backend
//!
//! Provides the REST transport (network or in-process), the session
//! controller, and the admin-side directory with the per-row permission
//! toggle state machine.

pub mod api;
pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod registration;
pub mod session;
pub mod transport;

pub use api::BackendApi;
pub use client::StafflineClient;
pub use config::ClientConfig;
pub use directory::{EmployeeDirectory, RowState, ToggleOutcome};
pub use error::{ClientError, ClientResult};
pub use registration::{PhotoAttachment, RegistrationForm};
pub use session::Session;
pub use transport::{NetworkTransport, OneshotTransport, Transport};

// Re-export shared types for convenience
pub use shared::client::{DebugStatus, ProfileUpdate, UserEnvelope};
pub use shared::{EmployeeRecord, ErrorBody, Gender, Role};
