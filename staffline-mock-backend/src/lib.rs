//! In-process mock of the employee-management backend.
//!
//! Serves the same REST contract as the real service, either bound to a
//! local socket or handed to a client as an axum `Router` for zero-network
//! testing.

pub mod api;
pub mod state;

pub use api::router;
pub use state::{Account, BackendState, NewAccount};
