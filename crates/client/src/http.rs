//! HTTP transport for the PLM backend.
//!
//! [`ApiClient`] wraps a [`reqwest::Client`], joins paths onto the configured
//! base URL, injects the bearer token from a [`CredentialProvider`] on every
//! request, and normalizes failures into [`ApiError`]. Endpoint wrappers live
//! in the sibling modules as further `impl ApiClient` blocks.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::credentials::CredentialProvider;
use crate::error::ApiError;

/// A response body as the backend sent it.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No body, `204 No Content`, or a JSON body that failed to parse on an
    /// error response.
    Empty,
    Json(serde_json::Value),
    Text(String),
}

impl Payload {
    /// Decode the payload into a typed record.
    ///
    /// An empty payload decodes as JSON `null`, so `()` and `Option<T>`
    /// succeed while records fail.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self {
            Payload::Empty => serde_json::Value::Null,
            Payload::Json(value) => value,
            Payload::Text(text) => serde_json::from_str(&text)?,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Message for a failed response: JSON `message`, then JSON `error`,
    /// then the text body, then `HTTP <status>`.
    fn error_message(&self, status: StatusCode) -> String {
        let found = match self {
            Payload::Json(body) => body
                .get("message")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .or_else(|| {
                    body.get("error")
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.is_empty())
                })
                .map(str::to_string),
            Payload::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            _ => None,
        };
        found.unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    }
}

/// HTTP client for one PLM backend.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, &config.base_url, credentials))
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- request helpers used by the endpoint modules ----

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path)?;
        self.send(request).await?.decode()
    }

    pub(crate) async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        self.send(request).await?.decode()
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(request).await?.decode()
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        self.send(request).await?.decode()
    }

    /// `PUT` without a body (e.g. toggle endpoints).
    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::PUT, path)?;
        self.send(request).await?.decode()
    }

    /// `PUT` with a body, discarding whatever body comes back.
    pub(crate) async fn put_discard<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        self.send(request).await?;
        Ok(())
    }

    /// `DELETE`, discarding whatever body comes back.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, path)?;
        self.send(request).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// Start a request with the JSON content type and, when the credential
    /// provider has one, the bearer token.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        let url = reqwest::Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;

        tracing::debug!(%method, %url, "Sending PLM API request");

        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.credentials.token() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        Ok(request)
    }

    /// Send a request and read its body, turning non-2xx responses into
    /// [`ApiError::Http`].
    async fn send(&self, request: RequestBuilder) -> Result<Payload, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "PLM API request failed before a response");
            ApiError::Network(e)
        })?;

        let status = response.status();
        let url = response.url().clone();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        let bytes = response.bytes().await.map_err(ApiError::Network)?;

        let payload = if status == StatusCode::NO_CONTENT || bytes.is_empty() {
            Payload::Empty
        } else if is_json {
            match serde_json::from_slice(&bytes) {
                Ok(value) => Payload::Json(value),
                Err(e) if status.is_success() => return Err(ApiError::Decode(e)),
                Err(_) => Payload::Empty,
            }
        } else {
            Payload::Text(String::from_utf8_lossy(&bytes).into_owned())
        };

        if !status.is_success() {
            let message = payload.error_message(status);
            tracing::warn!(
                status = status.as_u16(),
                %url,
                message = %message,
                "PLM API request rejected"
            );
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
                body: payload,
            });
        }

        Ok(payload)
    }
}
