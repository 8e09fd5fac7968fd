//! Typed API surface over the REST contract
//!
//! One method per backend endpoint; the transport decides whether calls go
//! over the wire or straight into an in-process Router.

use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::client::{
    DebugStatus, LoginRequest, MessageResponse, PermissionUpdate, ProfileUpdate, UserEnvelope,
};
use shared::models::EmployeeRecord;

use crate::error::ClientResult;
use crate::registration::RegistrationForm;
use crate::transport::{RequestBody, Transport, decode};

/// Typed client for the employee-management REST API.
#[derive(Debug, Clone)]
pub struct BackendApi<T: Transport> {
    transport: T,
}

impl<T: Transport> BackendApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> ClientResult<R> {
        decode(
            self.transport
                .execute(Method::GET, path, RequestBody::Empty)
                .await?,
        )
    }

    async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> ClientResult<R> {
        decode(
            self.transport
                .execute(Method::POST, path, RequestBody::Empty)
                .await?,
        )
    }

    async fn post_json<R: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<R> {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        decode(self.transport.execute(Method::POST, path, body).await?)
    }

    async fn put_json<R: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<R> {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        decode(self.transport.execute(Method::PUT, path, body).await?)
    }

    // ========== Auth API ==========

    /// Login against the admin endpoint.
    pub async fn admin_login(&self, username: &str, password: &str) -> ClientResult<UserEnvelope> {
        self.post_json("/admin/login/", &LoginRequest::new(username, password))
            .await
    }

    /// Login against the employee endpoint.
    pub async fn user_login(&self, username: &str, password: &str) -> ClientResult<UserEnvelope> {
        self.post_json("/user/login/", &LoginRequest::new(username, password))
            .await
    }

    /// Terminate the backend session.
    pub async fn logout(&self) -> ClientResult<MessageResponse> {
        self.post_empty("/logout/").await
    }

    /// Who is authenticated right now? Errors for unauthenticated callers.
    pub async fn current_user(&self) -> ClientResult<EmployeeRecord> {
        self.get("/current-user/").await
    }

    /// Diagnostic endpoint; development aid only.
    pub async fn debug_status(&self) -> ClientResult<DebugStatus> {
        self.get("/debug-user/").await
    }

    // ========== Employee API ==========

    /// Register a new employee (admin only). Multipart, to carry the
    /// optional photo attachment.
    pub async fn register_employee(&self, form: &RegistrationForm) -> ClientResult<UserEnvelope> {
        let body = RequestBody::Multipart(form.to_multipart());
        decode(
            self.transport
                .execute(Method::POST, "/register-employee/", body)
                .await?,
        )
    }

    /// Fetch the full employee list (admin only), in backend order.
    pub async fn employees(&self) -> ClientResult<Vec<EmployeeRecord>> {
        self.get("/employees/").await
    }

    /// Update one employee's active-permission flag (admin only).
    pub async fn update_permissions(
        &self,
        employee_id: i64,
        is_active_permission: bool,
    ) -> ClientResult<UserEnvelope> {
        self.put_json(
            &format!("/employees/{employee_id}/permissions/"),
            &PermissionUpdate {
                is_active_permission,
            },
        )
        .await
    }

    /// Update the signed-in user's own profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<UserEnvelope> {
        self.put_json("/update-profile/", update).await
    }
}
