//! HTTP request and response types described as plain data.
//!
//! # Design
//! `Client::build_request` produces an `HttpRequest` and
//! `Client::parse_response` consumes an `HttpResponse`. A `Transport` sits
//! between the two and is the only place that touches the network, so a host
//! can also run the round-trip itself and feed the response back in.
//!
//! The response body is a reader rather than a buffer. Dropping the
//! `HttpResponse` releases the underlying stream.

use std::fmt;
use std::io::{Cursor, Read};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing HTTP request.
///
/// `url` already carries the encoded query string. `headers` keeps the
/// merge order: default headers first, then call-specific ones. `body` is
/// `None` when the caller supplied no JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// A received HTTP response with a streaming body.
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read>,
}

impl HttpResponse {
    /// Response over an in-memory body.
    pub fn from_bytes(status: u16, reason: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: reason.to_string(),
            headers: Vec::new(),
            body: Box::new(Cursor::new(body.into())),
        }
    }

    /// Status line text, e.g. `404 Not Found`.
    pub fn status_text(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
