//! Network transport (reqwest)

use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

use super::{
    CSRF_COOKIE, CSRF_HEADER, MultipartBody, PartValue, RawResponse, RequestBody, Transport,
    cookie_from_header,
};

/// HTTP transport for a real backend.
///
/// Credentials are cookie/session based: a shared cookie jar carries the
/// session on every request, and the `csrftoken` cookie is mirrored into the
/// `X-CSRFToken` header. The configured timeout applies uniformly to all
/// calls; no call can be cancelled once dispatched.
#[derive(Debug, Clone)]
pub struct NetworkTransport {
    client: reqwest::Client,
    jar: Arc<Jar>,
    base_url: String,
}

impl NetworkTransport {
    /// Create a new transport from configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let jar = Arc::new(Jar::default());
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .cookie_provider(jar.clone());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let client = builder.build()?;

        // Fail fast on an unparseable base URL instead of per request.
        Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL: {e}")))?;

        Ok(Self {
            client,
            jar,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_url(&self, path: &str) -> ClientResult<Url> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ClientError::Config(format!("invalid request path {path:?}: {e}")))
    }

    /// CSRF token for this origin, read from the cookie jar.
    fn csrf_token(&self, url: &Url) -> Option<String> {
        let header = self.jar.cookies(url)?;
        cookie_from_header(header.to_str().ok()?, CSRF_COOKIE)
    }

    fn multipart_form(body: MultipartBody) -> ClientResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in body.parts {
            form = match part.value {
                PartValue::Text(value) => form.text(part.name, value),
                PartValue::File {
                    file_name,
                    content_type,
                    data,
                } => {
                    let file = reqwest::multipart::Part::bytes(data)
                        .file_name(file_name)
                        .mime_str(&content_type)
                        .map_err(ClientError::Transport)?;
                    form.part(part.name, file)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for NetworkTransport {
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> ClientResult<RawResponse> {
        let url = self.request_url(path)?;

        let mut request = self.client.request(method, url.clone());

        if let Some(token) = self.csrf_token(&url) {
            request = request.header(CSRF_HEADER, token);
        }

        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(form) => request.multipart(Self::multipart_form(form)?),
        };

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        Ok(RawResponse {
            status,
            body: bytes.to_vec(),
        })
    }
}
