//! Blocking HTTP client for JSON APIs.
//!
//! # Overview
//! A `Client` joins a base URL with a request path, merges its default query
//! parameters and headers with per-call ones, sends an optional JSON body and
//! decodes the JSON response. The network round-trip is delegated to a
//! `Transport`, `ureq` by default.
//!
//! # Design
//! - `Client` keeps no per-call state; one instance serves concurrent callers.
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`),
//!   so `build_request` and `parse_response` can be driven by a host that does
//!   its own I/O.
//! - Defaults and per-call values are merged additively, never overwritten.
//! - Status codes of 400 and above become `Error::Status` carrying only the
//!   status line; error bodies are discarded.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod json;
pub mod transport;
pub mod values;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use json::Json;
pub use transport::{Transport, TransportError, UreqTransport};
pub use values::Values;
