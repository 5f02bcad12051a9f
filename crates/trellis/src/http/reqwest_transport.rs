//! Default transport backed by `reqwest`
//!
//! Sends the request with its merged query string, reads the whole body,
//! and turns the result into a [`Completion`]:
//!
//! - 429: reported as rate limited, body ignored
//! - other 4xx/5xx: an [`Error::from_response`] payload
//! - 2xx/3xx: the body parsed as JSON, `null` when empty, or a JSON string
//!   when the body is not JSON

use super::{Completion, RequestDescriptor, Transport};
use crate::error::{Error, Result};
use async_trait::async_trait;
use http::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// HTTP transport for the public Trello API.
///
/// # Example
///
/// ```rust,no_run
/// use trellis::http::ReqwestTransport;
/// use std::time::Duration;
///
/// let transport = ReqwestTransport::builder()
///     .timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a new builder for configuring the transport.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// `timeout` is only used to label timeout errors; the client's own
    /// timeout settings apply.
    pub fn from_client(http_client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            http_client,
            timeout,
        }
    }

    fn connection_error(&self, error: &reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::Connection(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn issue(&self, request: &RequestDescriptor) -> Completion {
        let query: Vec<(&str, &str)> = request.query().iter().collect();

        let response = match self
            .http_client
            .request(request.verb().as_method(), request.url().clone())
            .query(&query)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Completion::failure(None, self.connection_error(&e)),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Completion::rate_limited();
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Completion::failure(Some(status), self.connection_error(&e)),
        };

        if status.is_client_error() || status.is_server_error() {
            let error = Error::from_response(status.as_u16(), &String::from_utf8_lossy(&body));
            return Completion::failure(Some(status), error);
        }

        Completion::success(status, decode_body(&body))
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

/// Decode a response body the way Trello bodies come: JSON, empty, or text.
pub(crate) fn decode_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

/// Builder for creating a `ReqwestTransport` with custom configuration.
#[derive(Debug, Default)]
pub struct ReqwestTransportBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    proxy: Option<String>,
}

impl ReqwestTransportBuilder {
    /// Set the per-attempt timeout.
    ///
    /// Defaults to 600 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header.
    ///
    /// Defaults to `trellis-rust/<version>`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Route all traffic through a proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HttpClient`] if the proxy URL is invalid or the HTTP
    /// client cannot be created.
    pub fn build(self) -> Result<ReqwestTransport> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("trellis-rust/{}", crate::VERSION));

        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent);

        if let Some(proxy) = self.proxy {
            let proxy = reqwest::Proxy::all(&proxy)
                .map_err(|e| Error::HttpClient(format!("Invalid proxy '{proxy}': {e}")))?;
            builder = builder.proxy(proxy);
        }

        let http_client = builder
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        Ok(ReqwestTransport {
            http_client,
            timeout,
        })
    }
}
