//! Transport layer
//!
//! A single `Transport` seam with two implementations: `NetworkTransport`
//! (reqwest over the wire) and `OneshotTransport` (in-process dispatch into
//! an axum `Router`, zero network overhead). Both carry cookies on every
//! request and attach the CSRF token read from the `csrftoken` cookie as the
//! `X-CSRFToken` header when present.

mod network;
mod oneshot;

use async_trait::async_trait;
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use shared::ErrorBody;

use crate::error::{ClientError, ClientResult};

pub use network::NetworkTransport;
pub use oneshot::OneshotTransport;

/// Cookie the backend stores the CSRF token in.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the CSRF token travels back on.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Request body shapes the API uses.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Multipart form, required for the optional binary photo attachment.
    Multipart(MultipartBody),
}

/// An ordered multipart form.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    pub parts: Vec<MultipartPart>,
}

impl MultipartBody {
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            value: PartValue::File {
                file_name: file_name.into(),
                content_type: content_type.into(),
                data,
            },
        });
        self
    }
}

#[derive(Debug, Clone)]
pub struct MultipartPart {
    pub name: String,
    pub value: PartValue,
}

#[derive(Debug, Clone)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

/// Raw response before decoding: status plus body bytes.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Transport seam between the typed API and the wire.
///
/// An `Err` from `execute` means the request never produced a response
/// (transport failure); error *responses* come back as `Ok` with a
/// non-success status and are classified by [`decode`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> ClientResult<RawResponse>;
}

/// Decodes a raw response: deserializes on success, classifies the error
/// payload by status otherwise.
pub(crate) fn decode<T: DeserializeOwned>(response: RawResponse) -> ClientResult<T> {
    let status = response.status;
    if !status.is_success() {
        let body = ErrorBody::parse(&response.body);
        return Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(body.to_string()),
            StatusCode::FORBIDDEN => ClientError::Forbidden(body.to_string()),
            StatusCode::NOT_FOUND => ClientError::NotFound(body.to_string()),
            StatusCode::BAD_REQUEST => ClientError::Validation(body),
            _ => ClientError::Api {
                status: status.as_u16(),
                message: body.to_string(),
            },
        });
    }

    serde_json::from_slice(&response.body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {e}")))
}

/// Extracts a cookie value out of a `Cookie`-header-shaped string
/// (`name=value; other=value`).
pub(crate) fn cookie_from_header(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_lookup_by_name() {
        let header = "sessionid=abc123; csrftoken=tok-1; theme=dark";
        assert_eq!(cookie_from_header(header, "csrftoken").as_deref(), Some("tok-1"));
        assert_eq!(cookie_from_header(header, "sessionid").as_deref(), Some("abc123"));
        assert_eq!(cookie_from_header(header, "missing"), None);
    }

    #[test]
    fn decode_maps_statuses_onto_error_classes() {
        let resp = RawResponse {
            status: StatusCode::FORBIDDEN,
            body: br#"{"error": "Only admin can view employees"}"#.to_vec(),
        };
        match decode::<serde_json::Value>(resp) {
            Err(ClientError::Forbidden(msg)) => {
                assert_eq!(msg, "Only admin can view employees")
            }
            other => panic!("unexpected: {other:?}"),
        }

        let resp = RawResponse {
            status: StatusCode::BAD_REQUEST,
            body: br#"{"email": ["This field is required."]}"#.to_vec(),
        };
        match decode::<serde_json::Value>(resp) {
            Err(ClientError::Validation(body)) => {
                assert!(body.fields().unwrap().contains_key("email"))
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
