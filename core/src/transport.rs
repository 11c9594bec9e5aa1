//! The seam between request building and the network.
//!
//! # Design
//! `Client` owns an `Arc<dyn Transport>` and hands every built `HttpRequest`
//! to it. `UreqTransport` is the default and does real blocking I/O; tests
//! swap in a fake that returns canned responses. A transport reports
//! non-success status codes as ordinary responses; mapping them to errors is
//! the client's job.

use std::sync::Arc;
use std::time::Duration;

use ureq::http;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Error raised by a transport before any response was received.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Executes one HTTP round-trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// The agent's connection pool is shared by every clone. 4xx/5xx responses
/// come back as data, and the body is streamed rather than buffered.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Transport that fails any call taking longer than `timeout` overall.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }

    fn run(&self, request: http::Request<impl ureq::AsSendBody>) -> Result<HttpResponse, TransportError> {
        let response = self.agent.run(request)?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: Box::new(response.into_body().into_reader()),
        })
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
        };

        let mut builder = http::Request::builder().method(method).uri(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        match (request.method, request.body.as_deref()) {
            (_, Some(body)) => self.run(builder.body(body)?),
            // Write methods always carry a body, even an empty one.
            (HttpMethod::Post | HttpMethod::Put, None) => self.run(builder.body(&b""[..])?),
            (HttpMethod::Get | HttpMethod::Delete, None) => self.run(builder.body(())?),
        }
    }
}
