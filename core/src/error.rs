//! Error type for the request client.
//!
//! # Design
//! Every failure surfaces as a single `Error` whose `Display` text is the
//! whole message callers see. The variants record the cause so logs and tests
//! can tell them apart, but no variant carries a response body: a status
//! error only keeps the code and the status line.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by `Client` calls.
#[derive(Debug, Error)]
pub enum Error {
    /// Base URL and path did not form an absolute URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The request body could not be serialized to JSON. No request was sent.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The transport failed before a response arrived.
    #[error("{0}")]
    Transport(#[source] TransportError),

    /// The server answered with a status code of 400 or above.
    #[error("{status}")]
    Status { code: u16, status: String },

    /// The response body did not start with a valid JSON value.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A `ClientConfig` document could not be parsed.
    #[error("invalid config: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status code for status errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
