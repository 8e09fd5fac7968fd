//! Client-related types shared between the backend contract and the client
//!
//! Common request/response types used in API communication. Field names
//! match the backend's snake_case wire format.

use serde::{Deserialize, Serialize};

use crate::models::EmployeeRecord;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Response envelope carrying a confirmation message and the affected user.
///
/// The backend uses this shape for login, registration, permission updates
/// and profile updates alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    #[serde(default)]
    pub message: String,
    pub user: EmployeeRecord,
}

/// Plain confirmation message (logout).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Diagnostic snapshot from the development-aid endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugStatus {
    pub user_authenticated: bool,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub session_key: Option<String>,
}

// =============================================================================
// Employee API DTOs
// =============================================================================

/// Body of the per-employee permission update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PermissionUpdate {
    pub is_active_permission: bool,
}

/// Partial profile update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
