//! Built-in renderers.
//!
//! | Name | Content type | Body |
//! |---|---|---|
//! | `json` | `application/json` (if unset) | JSON text, wrapped as `callback(...)` when a callback is given |
//! | `js` | `text/javascript` (if unset) | the value's script form, or the value itself |
//! | `xml` | `application/xml` (if unset) | the value's XML form, or the value itself |
//! | `update` | `text/javascript` (always) | statements produced by a [`ScriptBlock`](rendition_core::ScriptBlock) |

use crate::registry::RendererRegistry;
use rendition_core::{
    BoxError, Options, RenderContext, ScriptGenerator, Serializable, Value, mime,
};
use thiserror::Error;

/// Name of the JSON renderer.
pub const JSON: &str = "json";
/// Name of the script renderer.
pub const JS: &str = "js";
/// Name of the XML renderer.
pub const XML: &str = "xml";
/// Name of the script-generator renderer.
pub const UPDATE: &str = "update";

/// Names of the built-ins, in registration order.
pub const BUILTINS: [&str; 4] = [JSON, JS, XML, UPDATE];

/// Failures raised by the built-in renderers.
#[derive(Error, Debug)]
pub enum BuiltinError {
    /// The value has no form this renderer can emit.
    #[error("`{renderer}` renderer cannot render {found}")]
    Unsupported {
        /// Name of the failing renderer.
        renderer: &'static str,
        /// What kind of value it was given.
        found: &'static str,
    },

    /// JSON encoding failed.
    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Register the built-ins into `registry`.
pub fn install(registry: &RendererRegistry) {
    registry.register(JSON, json);
    registry.register(JS, js);
    registry.register(XML, xml);
    registry.register(UPDATE, update);
}

/// Render JSON text, wrapped in the callback when one is given.
pub fn json(value: &Value, options: &Options, ctx: &mut RenderContext) -> Result<(), BoxError> {
    let text = match value {
        Value::Text(text) | Value::Plain(serde_json::Value::String(text)) => text.clone(),
        Value::Plain(data) => serde_json::to_string(data).map_err(BuiltinError::from)?,
        Value::Object(object) => object
            .to_json()
            .ok_or_else(|| unsupported(JSON, value))?,
        Value::Script(_) => return Err(unsupported(JSON, value).into()),
    };
    let text = match options.callback()? {
        Some(callback) => format!("{callback}({text})"),
        None => text,
    };
    ctx.default_content_type(mime::JSON);
    ctx.set_response_body(text);
    Ok(())
}

/// Render the value's script form, or the value itself.
pub fn js(value: &Value, _options: &Options, ctx: &mut RenderContext) -> Result<(), BoxError> {
    let body = represent(JS, value, |object| object.to_js())?;
    ctx.default_content_type(mime::JS);
    ctx.set_response_body(body);
    Ok(())
}

/// Render the value's XML form, or the value itself.
pub fn xml(value: &Value, _options: &Options, ctx: &mut RenderContext) -> Result<(), BoxError> {
    let body = represent(XML, value, |object| object.to_xml())?;
    ctx.default_content_type(mime::XML);
    ctx.set_response_body(body);
    Ok(())
}

/// Run a [`ScriptBlock`](rendition_core::ScriptBlock) against a generator bound to the view.
pub fn update(value: &Value, _options: &Options, ctx: &mut RenderContext) -> Result<(), BoxError> {
    let Value::Script(block) = value else {
        return Err(unsupported(UPDATE, value).into());
    };
    let mut generator = ScriptGenerator::new(ctx.view().cloned());
    block.build(&mut generator)?;
    ctx.set_content_type(mime::JS);
    ctx.set_response_body(generator.to_string());
    Ok(())
}

// The capability output for objects, otherwise the value itself.
fn represent(
    // Name of the failing renderer.
    renderer: &'static str,
    value: &Value,
    capability: impl Fn(&dyn Serializable) -> Option<String>,
) -> Result<String, BuiltinError> {
    let body = match value {
        Value::Object(object) => capability(object.as_ref()),
        other => other.passthrough(),
    };
    body.ok_or_else(|| unsupported(renderer, value))
}

fn unsupported(renderer: &'static str, value: &Value) -> BuiltinError {
    let found = match value {
        Value::Plain(_) => "plain data",
        Value::Text(_) => "text",
        Value::Object(_) => "an object without that capability",
        Value::Script(_) => "a script block",
    };
    BuiltinError::Unsupported { renderer, found }
}
