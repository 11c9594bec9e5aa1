//! Blocking JSON client over a pluggable transport.
//!
//! # Design
//! Every verb goes through `send`, which is `build_request`, then one
//! `Transport::execute` round-trip, then `parse_response`. The two halves are
//! public so a host that does its own I/O can call them directly.
//!
//! Defaults and call-specific values are merged additively: a key present in
//! both ends up with the default values followed by the call values. The
//! target URL is the literal `base_url + "/" + path`; no slashes are added or
//! collapsed.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::json::Json;
use crate::transport::{Transport, UreqTransport};
use crate::values::Values;

/// Client holding a base URL plus default query parameters and headers.
///
/// The fields are meant to be set directly after construction. The client
/// keeps no per-call state, so one instance can serve concurrent callers.
#[derive(Clone)]
pub struct Client {
    pub base_url: String,
    pub default_params: Values,
    pub default_headers: Values,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Client with an empty base URL, no defaults and the `ureq` transport.
    pub fn new() -> Self {
        Self::with_transport(UreqTransport::new())
    }

    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            base_url: String::new(),
            default_params: Values::new(),
            default_headers: Values::new(),
            transport: Arc::new(transport),
        }
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let transport = match config.timeout_secs {
            Some(secs) => UreqTransport::with_timeout(Duration::from_secs(secs)),
            None => UreqTransport::new(),
        };
        let mut client = Self::with_transport(transport);
        client.base_url = config.base_url;
        client.default_params = config.default_params;
        client.default_headers = config.default_headers;
        client
    }

    pub fn get(&self, path: &str, params: Option<&Values>, headers: Option<&Values>) -> Result<Json> {
        self.send::<Json>(HttpMethod::Get, path, params, None, headers)
    }

    pub fn post(
        &self,
        path: &str,
        params: Option<&Values>,
        body: Option<&Json>,
        headers: Option<&Values>,
    ) -> Result<Json> {
        self.send(HttpMethod::Post, path, params, body, headers)
    }

    pub fn put(
        &self,
        path: &str,
        params: Option<&Values>,
        body: Option<&Json>,
        headers: Option<&Values>,
    ) -> Result<Json> {
        self.send(HttpMethod::Put, path, params, body, headers)
    }

    pub fn delete(&self, path: &str, params: Option<&Values>, headers: Option<&Values>) -> Result<Json> {
        self.send::<Json>(HttpMethod::Delete, path, params, None, headers)
    }

    /// Run one request/response cycle with any serializable body.
    pub fn send<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&Values>,
        body: Option<&B>,
        headers: Option<&Values>,
    ) -> Result<Json> {
        let request = self.build_request(method, path, params, body, headers)?;
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request).map_err(Error::Transport)?;
        self.parse_response(response)
    }

    /// Build the outgoing request without touching the network.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&Values>,
        body: Option<&B>,
        headers: Option<&Values>,
    ) -> Result<HttpRequest> {
        let target = format!("{}/{}", self.base_url, path);
        let mut url = Url::parse(&target).map_err(|e| Error::InvalidUrl(format!("{target}: {e}")))?;

        let query = merged(&self.default_params, params);
        if query.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&query.encode()));
        }

        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let headers = merged(&self.default_headers, headers)
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        })
    }

    /// Map a received response to a JSON value or an error.
    ///
    /// The body is only read for status codes below 400. It is released when
    /// `response` goes out of scope, on every path.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Json> {
        debug!(status = response.status, "received response");
        if response.status > 399 {
            let status = response.status_text();
            debug!(%status, "request failed");
            return Err(Error::Status {
                code: response.status,
                status,
            });
        }
        // Only the first value is decoded; anything after it is ignored.
        let mut decoder = serde_json::Deserializer::from_reader(response.body);
        Value::deserialize(&mut decoder)
            .map(Json::new)
            .map_err(|e| Error::Deserialization(e.to_string()))
    }
}

fn merged(defaults: &Values, extra: Option<&Values>) -> Values {
    let mut values = Values::new();
    values.merge(defaults);
    if let Some(extra) = extra {
        values.merge(extra);
    }
    values
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("default_params", &self.default_params)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}
