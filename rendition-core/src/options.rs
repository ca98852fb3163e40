//! The options mapping consumed by dispatch.

use crate::{error::DispatchError, value::Value};
use std::{borrow::Cow, collections::HashMap};

/// Key that carries a JSONP callback name for the `json` renderer.
pub const CALLBACK: &str = "callback";
/// Key that carries the HTTP status for the response.
pub const STATUS: &str = "status";
/// Key that carries an explicit content type for the response.
pub const CONTENT_TYPE: &str = "content_type";
/// Key that carries a `Location` header value for the response.
pub const LOCATION: &str = "location";

/// A string-keyed mapping of render options.
///
/// Recognized keys are the enabled renderer names plus renderer-specific
/// extras such as [`CALLBACK`]. Insertion order carries no meaning; dispatch
/// precedence comes from the component's enable order.
#[derive(Clone, Debug, Default)]
pub struct Options {
    entries: HashMap<String, Value>,
}

impl Options {
    /// Create an empty options mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, returning the mapping (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a key, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The callback name, if present and not blank.
    ///
    /// Strings are used verbatim and other scalars by their JSON text;
    /// collections, objects and script blocks are rejected.
    pub fn callback(&self) -> Result<Option<Cow<'_, str>>, DispatchError> {
        let Some(value) = self.get(CALLBACK).filter(|v| !v.is_blank()) else {
            return Ok(None);
        };
        if let Some(name) = value.as_str() {
            return Ok(Some(Cow::Borrowed(name)));
        }
        match value {
            Value::Plain(
                scalar @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_)),
            ) => Ok(Some(Cow::Owned(scalar.to_string()))),
            other => Err(DispatchError::InvalidOptions(format!(
                "`{CALLBACK}` must be a scalar, got {other:?}"
            ))),
        }
    }

    /// The `status` key as an HTTP status code.
    pub fn status(&self) -> Result<Option<u16>, DispatchError> {
        let Some(value) = self.get(STATUS) else {
            return Ok(None);
        };
        let code = match value {
            Value::Plain(serde_json::Value::Number(n)) => n.as_u64(),
            other => other.as_str().and_then(|s| s.trim().parse::<u64>().ok()),
        };
        match code {
            Some(code @ 100..=999) => Ok(Some(code as u16)),
            _ => Err(DispatchError::InvalidOptions(format!(
                "`{STATUS}` must be an HTTP status code, got {value:?}"
            ))),
        }
    }

    /// The `content_type` key.
    pub fn content_type(&self) -> Result<Option<&str>, DispatchError> {
        self.string_key(CONTENT_TYPE)
    }

    /// The `location` key.
    pub fn location(&self) -> Result<Option<&str>, DispatchError> {
        self.string_key(LOCATION)
    }

    fn string_key(&self, key: &str) -> Result<Option<&str>, DispatchError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value.as_str().map(Some).ok_or_else(|| {
                DispatchError::InvalidOptions(format!("`{key}` must be a string, got {value:?}"))
            }),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Loosely typed options must be a JSON object.
impl TryFrom<serde_json::Value> for Options {
    type Error = DispatchError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(DispatchError::InvalidOptions(format!(
                "expected a key-value mapping, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
