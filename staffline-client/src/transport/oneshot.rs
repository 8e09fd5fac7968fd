//! Oneshot transport - in-process dispatch into an axum Router
//!
//! Uses the Tower `oneshot` pattern to call a Router directly, for
//! same-process backend stand-ins and tests with zero network overhead.
//! Cookies are tracked in a local store so session and CSRF behavior match
//! the network transport.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{Method, Request};
use tokio::sync::RwLock;
use tower::ServiceExt;

use crate::error::{ClientError, ClientResult};

use super::{
    CSRF_COOKIE, CSRF_HEADER, MultipartBody, PartValue, RawResponse, RequestBody, Transport,
};

/// In-process transport dispatching into a Router.
#[derive(Debug, Clone)]
pub struct OneshotTransport {
    router: Router,
    /// Path prefix prepended to every request, mirroring the base-URL prefix
    /// the network transport carries.
    prefix: String,
    cookies: Arc<RwLock<BTreeMap<String, String>>>,
}

impl OneshotTransport {
    /// Create a transport over an already-initialized Router (state applied).
    /// Requests are issued under the standard `/api` prefix.
    pub fn new(router: Router) -> Self {
        Self::with_prefix(router, "/api")
    }

    pub fn with_prefix(router: Router, prefix: impl Into<String>) -> Self {
        Self {
            router,
            prefix: prefix.into(),
            cookies: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Current value of a stored cookie, if any.
    pub async fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.read().await.get(name).cloned()
    }

    async fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies.read().await;
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Absorbs `Set-Cookie` headers from a response. An empty value drops
    /// the cookie, which is how the backend clears the session on logout.
    async fn store_cookies(&self, headers: &http::HeaderMap) {
        let mut cookies = self.cookies.write().await;
        for header in headers.get_all(SET_COOKIE) {
            let Ok(raw) = header.to_str() else { continue };
            let Some(pair) = raw.split(';').next() else { continue };
            let Some((name, value)) = pair.split_once('=') else { continue };
            let (name, value) = (name.trim(), value.trim());
            if value.is_empty() {
                cookies.remove(name);
            } else {
                cookies.insert(name.to_string(), value.to_string());
            }
        }
    }

    async fn build_request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> ClientResult<Request<Body>> {
        let uri = format!("{}{}", self.prefix, path);
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(cookie) = self.cookie_header().await {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(token) = self.cookie(CSRF_COOKIE).await {
            builder = builder.header(CSRF_HEADER, token);
        }

        let request = match body {
            RequestBody::Empty => builder.body(Body::empty()),
            RequestBody::Json(value) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&value)?)),
            RequestBody::Multipart(form) => {
                let (boundary, bytes) = encode_multipart(&form);
                builder
                    .header(
                        CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(bytes))
            }
        };
        request.map_err(|e| ClientError::InvalidResponse(format!("failed to build request: {e}")))
    }
}

#[async_trait]
impl Transport for OneshotTransport {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> ClientResult<RawResponse> {
        let request = self.build_request(method, path, body).await?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("oneshot call failed: {e}")))?;

        let status = response.status();
        self.store_cookies(response.headers()).await;

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("failed to read body: {e}")))?;

        Ok(RawResponse {
            status,
            body: bytes.to_vec(),
        })
    }
}

/// Encodes a `multipart/form-data` body by hand; the network transport gets
/// this from reqwest, the in-process path has no equivalent.
fn encode_multipart(form: &MultipartBody) -> (String, Vec<u8>) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let boundary = format!("staffline-{nanos:032x}");

    let mut body = Vec::new();
    for part in &form.parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match &part.value {
            PartValue::Text(value) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                        part.name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            PartValue::File {
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        part.name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    (boundary, body)
}
