//! Values carried in an options mapping.
//!
//! A [`Value`] states up front which serialization capabilities it has,
//! instead of renderers probing the value at render time.

use crate::{error::BoxError, script::ScriptGenerator};
use std::{fmt, sync::Arc};

/// Serialization capabilities a value may expose.
///
/// Each method returns `None` when the value does not support that form.
/// Renderers fall back to their own encoding (json) or pass the value
/// through unchanged (js, xml).
pub trait Serializable: Send + Sync + fmt::Debug {
    /// JSON text for this value.
    fn to_json(&self) -> Option<String> {
        None
    }

    /// XML document text for this value.
    fn to_xml(&self) -> Option<String> {
        None
    }

    /// Script text for this value.
    fn to_js(&self) -> Option<String> {
        None
    }
}

/// Builder function run by the `update` renderer against a fresh
/// [`ScriptGenerator`].
#[derive(Clone)]
pub struct ScriptBlock(Arc<dyn Fn(&mut ScriptGenerator) -> Result<(), BoxError> + Send + Sync>);

impl ScriptBlock {
    /// Wrap a builder function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut ScriptGenerator) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the builder against `generator`.
    pub fn build(&self, generator: &mut ScriptGenerator) -> Result<(), BoxError> {
        (self.0)(generator)
    }
}

impl fmt::Debug for ScriptBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ScriptBlock(..)")
    }
}

/// A value in an options mapping.
#[derive(Clone, Debug)]
pub enum Value {
    /// Plain data without any serialization capability.
    Plain(serde_json::Value),
    /// Text that is already serialized and is used verbatim.
    Text(String),
    /// A value exposing its own serializations.
    Object(Arc<dyn Serializable>),
    /// A script builder, consumed by the `update` renderer.
    Script(ScriptBlock),
}

impl Value {
    /// Wrap a value that implements [`Serializable`].
    pub fn object<S: Serializable + 'static>(value: S) -> Self {
        Value::Object(Arc::new(value))
    }

    /// Wrap a script builder function.
    pub fn script<F>(f: F) -> Self
    where
        F: Fn(&mut ScriptGenerator) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Value::Script(ScriptBlock::new(f))
    }

    /// The value as a string slice, if it is textual.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Plain(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Blank values are absent for the purpose of optional keys: null,
    /// `false`, whitespace-only strings and empty collections.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Text(s) => s.trim().is_empty(),
            Value::Plain(v) => match v {
                serde_json::Value::Null | serde_json::Value::Bool(false) => true,
                serde_json::Value::String(s) => s.trim().is_empty(),
                serde_json::Value::Array(a) => a.is_empty(),
                serde_json::Value::Object(o) => o.is_empty(),
                _ => false,
            },
            Value::Object(_) | Value::Script(_) => false,
        }
    }

    /// The value itself as body text, used when a renderer has no
    /// capability to call: strings verbatim, other plain data as JSON.
    pub fn passthrough(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s.clone()),
            Value::Plain(serde_json::Value::String(s)) => Some(s.clone()),
            Value::Plain(v) => Some(v.to_string()),
            Value::Object(_) | Value::Script(_) => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Plain(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<ScriptBlock> for Value {
    fn from(value: ScriptBlock) -> Self {
        Value::Script(value)
    }
}
