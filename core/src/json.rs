//! Opaque carrier for request and response JSON bodies.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// An arbitrary decoded JSON value.
///
/// The client never inspects the shape of the wrapped value; it only
/// marshals it on the way out and fills it on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Json {
    raw: Value,
}

impl Json {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Encode any serializable value into a `Json`.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        serde_json::to_value(value)
            .map(Self::new)
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn raw_mut(&mut self) -> &mut Value {
        &mut self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Decode the wrapped value into a typed structure.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        T::deserialize(&self.raw).map_err(|e| Error::Deserialization(e.to_string()))
    }
}

impl From<Value> for Json {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        json.raw
    }
}

impl PartialEq<Value> for Json {
    fn eq(&self, other: &Value) -> bool {
        self.raw == *other
    }
}
