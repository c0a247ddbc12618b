//! Envelope and payload values
//!
//! The envelope is the `{"action": ..., "data": {...}}` object sent to the
//! endpoint. `data` holds flat scalar values in insertion order.

use eyre::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single payload value. Nested objects and arrays are not representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

/// Ordered field mapping carried in `data`
pub type Fields = IndexMap<String, Scalar>;

/// Build a [`Fields`] map, keeping the order the pairs are written in.
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = $crate::webhook::Fields::new();
        $(map.insert(String::from($key), $crate::webhook::Scalar::from($value));)*
        map
    }};
}

/// Wire envelope; `action` always serializes before `data`.
#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    pub action: &'a str,
    pub data: &'a Fields,
}

impl<'a> Envelope<'a> {
    pub fn new(action: &'a str, data: &'a Fields) -> Self {
        Self { action, data }
    }

    /// Canonical body bytes. These exact bytes are signed and sent.
    pub fn to_body(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).context("Failed to serialize webhook envelope")
    }
}

/// Parse a JSON object into flat fields, rejecting nested values.
pub fn parse_fields(json: &str) -> Result<Fields> {
    serde_json::from_str(json).context("data must be a JSON object of string, integer, boolean or null values")
}
