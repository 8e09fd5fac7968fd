//! Client configuration

use std::time::Duration;

/// Request timeout applied uniformly to every call, matching the backend
/// contract's fixed overall client-side timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for connecting to the employee-management backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL including the API prefix
    /// (e.g., "http://127.0.0.1:8000/api").
    pub base_url: String,

    /// Request timeout in seconds, applied to all calls.
    pub timeout: u64,

    /// Optional User-Agent header.
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a new configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8000/api")
    }
}
