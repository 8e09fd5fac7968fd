//! Session controller
//!
//! Owns the [`Session`] exclusively and drives the bootstrap, login, and
//! logout flows against the typed API.

use shared::client::{DebugStatus, ProfileUpdate};
use shared::models::EmployeeRecord;

use crate::api::BackendApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::transport::{NetworkTransport, Transport};

/// Application-level client: typed API plus the current session.
#[derive(Debug)]
pub struct StafflineClient<T: Transport> {
    api: BackendApi<T>,
    session: Session,
}

impl StafflineClient<NetworkTransport> {
    /// Build a network client from configuration.
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(NetworkTransport::new(config)?))
    }
}

impl<T: Transport> StafflineClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            api: BackendApi::new(transport),
            session: Session::Anonymous,
        }
    }

    pub fn api(&self) -> &BackendApi<T> {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Ask the backend who is authenticated right now and replace the
    /// session with the answer. Any failure, including plain
    /// unauthenticated, resolves to an anonymous session; no distinction is
    /// surfaced at this stage.
    pub async fn bootstrap(&mut self) -> &Session {
        self.session = match self.api.current_user().await {
            Ok(user) => {
                tracing::info!(username = %user.username, role = %user.role(), "session bootstrapped");
                Session::signed_in(user)
            }
            Err(err) => {
                tracing::debug!(error = %err, "bootstrap resolved to anonymous session");
                Session::Anonymous
            }
        };
        &self.session
    }

    /// Login against the admin endpoint. Success replaces the session
    /// wholesale; failure leaves it untouched so the caller can retry.
    pub async fn login_admin(&mut self, username: &str, password: &str) -> ClientResult<&EmployeeRecord> {
        let envelope = self.api.admin_login(username, password).await?;
        self.replace_session(envelope.user)
    }

    /// Login against the employee endpoint.
    pub async fn login_employee(&mut self, username: &str, password: &str) -> ClientResult<&EmployeeRecord> {
        let envelope = self.api.user_login(username, password).await?;
        self.replace_session(envelope.user)
    }

    /// Terminate the session. Fail-open: a backend failure is logged and
    /// swallowed, and the local session is cleared unconditionally, so the
    /// caller always perceives logout as successful.
    pub async fn logout(&mut self) {
        if let Err(err) = self.api.logout().await {
            tracing::warn!(error = %err, "logout request failed; clearing local session anyway");
        }
        self.session = Session::Anonymous;
    }

    /// Update the signed-in user's profile and replace the session's user
    /// snapshot with the record the backend returns.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> ClientResult<&EmployeeRecord> {
        let envelope = self.api.update_profile(update).await?;
        self.replace_session(envelope.user)
    }

    /// Diagnostic passthrough; development aid only.
    pub async fn debug_status(&self) -> ClientResult<DebugStatus> {
        self.api.debug_status().await
    }

    fn replace_session(&mut self, user: EmployeeRecord) -> ClientResult<&EmployeeRecord> {
        tracing::info!(username = %user.username, role = %user.role(), "session replaced");
        self.session = Session::signed_in(user);
        self.session
            .user()
            .ok_or_else(|| ClientError::InvalidResponse("session missing user after login".into()))
    }
}
