//! HTTP transport abstraction
//!
//! The client reaches the network only through the [`HttpTransport`] trait,
//! so tests can substitute an in-process double. [`ReqwestTransport`] is the
//! production implementation.

use crate::client::ClientConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;

/// HTTP verb selected by the request pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully prepared HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL including the API method path segment
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    /// Raw body; must be byte-identical to any signed payload
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Capability to issue a single HTTP request and return the raw body
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return the raw response body
    async fn send(&self, request: HttpRequest) -> Result<String, TransportError>;
}

/// Production transport backed by [`reqwest`]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from client configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or("payeer-rest/0.1.0"))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<String, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Http(e)
            }
        })?;

        response.text().await.map_err(TransportError::Http)
    }
}
