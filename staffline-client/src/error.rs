//! Client error types

use shared::ErrorBody;
use thiserror::Error;

/// Client error type.
///
/// Every variant is convertible to a display string at the call site nearest
/// the user action; nothing propagates past that point and nothing is
/// retried automatically.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never reached the server (connect failure, timeout).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Authentication required (401).
    #[error("authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied (403).
    #[error("permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Validation error (400), carrying the parsed backend payload.
    #[error("validation failed: {0}")]
    Validation(ErrorBody),

    /// Any other error response, including server faults (5xx).
    #[error("server returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Local role guard: the session is not an admin session, so the call
    /// was skipped without touching the network.
    #[error("Access denied: Admin privileges required")]
    AdminRequired,
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Human-readable cause for a failed employee-list fetch, one message
    /// per failure class. Transport failures (no response received) are
    /// reported distinctly from error responses.
    pub fn fetch_failure_cause(&self) -> String {
        match self {
            ClientError::Transport(_) => {
                "Network error. Check if the backend server is running.".to_string()
            }
            ClientError::Unauthorized(_) => "Please log in again.".to_string(),
            ClientError::Forbidden(_) | ClientError::AdminRequired => {
                "Access denied. Admin privileges required.".to_string()
            }
            ClientError::NotFound(_) => "API endpoint not found.".to_string(),
            ClientError::Api { status, message } => {
                if *status >= 500 {
                    "Server error. Check the backend logs.".to_string()
                } else if !message.is_empty() {
                    message.clone()
                } else {
                    format!("HTTP {status} error.")
                }
            }
            ClientError::Validation(body) => match body.message() {
                Some(msg) => msg.to_string(),
                None => "HTTP 400 error.".to_string(),
            },
            other => other.to_string(),
        }
    }

    /// Message to show for a failed login: the backend-provided error when
    /// there is one, a generic fallback otherwise.
    pub fn login_failure_message(&self) -> String {
        match self {
            ClientError::Forbidden(msg) | ClientError::Unauthorized(msg) if !msg.is_empty() => {
                msg.clone()
            }
            ClientError::Validation(body) => match body.message() {
                Some(msg) => msg.to_string(),
                None => "Login failed".to_string(),
            },
            ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => "Login failed".to_string(),
        }
    }

    /// Message to show for a failed registration. Field-keyed validation
    /// errors render as one `field: message` line per field; a top-level
    /// error string passes through; anything else falls back to a generic
    /// message.
    pub fn registration_failure_message(&self) -> String {
        match self {
            ClientError::Validation(body) => match body {
                ErrorBody::Fields(_) | ErrorBody::Message(_) => body.to_string(),
                ErrorBody::Raw(_) => "Registration failed. Please try again.".to_string(),
            },
            ClientError::Forbidden(msg) if !msg.is_empty() => msg.clone(),
            ClientError::Transport(_) => {
                "Registration failed. Please check your connection and try again.".to_string()
            }
            _ => "Registration failed. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::FieldErrors;

    #[test]
    fn fetch_failure_causes_by_class() {
        assert_eq!(
            ClientError::Unauthorized("".into()).fetch_failure_cause(),
            "Please log in again."
        );
        assert_eq!(
            ClientError::AdminRequired.fetch_failure_cause(),
            "Access denied. Admin privileges required."
        );
        assert_eq!(
            ClientError::NotFound("".into()).fetch_failure_cause(),
            "API endpoint not found."
        );
        assert_eq!(
            ClientError::Api {
                status: 500,
                message: "boom".into()
            }
            .fetch_failure_cause(),
            "Server error. Check the backend logs."
        );
        assert_eq!(
            ClientError::Api {
                status: 418,
                message: String::new()
            }
            .fetch_failure_cause(),
            "HTTP 418 error."
        );
    }

    #[test]
    fn login_failure_prefers_backend_message() {
        let err = ClientError::Forbidden("Not an admin user".into());
        assert_eq!(err.login_failure_message(), "Not an admin user");

        // DRF's non_field_errors carry no top-level message the UI reads.
        let mut fields = FieldErrors::new();
        fields.insert("non_field_errors".into(), vec!["Invalid credentials".into()]);
        let err = ClientError::Validation(ErrorBody::Fields(fields));
        assert_eq!(err.login_failure_message(), "Login failed");
    }

    #[test]
    fn registration_failure_renders_field_lines() {
        let mut fields = FieldErrors::new();
        fields.insert("email".into(), vec!["This field is required.".into()]);
        let err = ClientError::Validation(ErrorBody::Fields(fields));
        assert_eq!(
            err.registration_failure_message(),
            "email: This field is required."
        );
    }
}
