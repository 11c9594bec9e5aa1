//! Serializable client settings.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::values::Values;

/// Settings applied by `Client::from_config`. Every field is optional in the
/// serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub default_params: Values,
    pub default_headers: Values,
    /// Overall per-call timeout enforced by the transport.
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }
}
