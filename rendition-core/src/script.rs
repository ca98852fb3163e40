//! Script generation for the `update` renderer.

use crate::{context::ViewContext, error::BoxError};
use std::{fmt, sync::Arc};

/// Accumulates script statements, optionally rendering markup through the
/// view it is bound to.
#[derive(Debug, Default)]
pub struct ScriptGenerator {
    view: Option<Arc<dyn ViewContext>>,
    lines: Vec<String>,
}

impl ScriptGenerator {
    /// Create a generator bound to `view`.
    pub fn new(view: Option<Arc<dyn ViewContext>>) -> Self {
        Self {
            view,
            lines: Vec::new(),
        }
    }

    /// The view this generator is bound to.
    pub fn view(&self) -> Option<&Arc<dyn ViewContext>> {
        self.view.as_ref()
    }

    /// Append a raw statement.
    pub fn push(&mut self, statement: impl Into<String>) -> &mut Self {
        self.lines.push(statement.into());
        self
    }

    /// `function(arg, ...);` with arguments encoded as JSON literals.
    pub fn call(&mut self, function: &str, args: &[serde_json::Value]) -> &mut Self {
        let args = args
            .iter()
            .map(serde_json::Value::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.push(format!("{function}({args});"))
    }

    /// `variable = value;`
    pub fn assign(&mut self, variable: &str, value: &serde_json::Value) -> &mut Self {
        self.push(format!("{variable} = {value};"))
    }

    /// `alert(message);`
    pub fn alert(&mut self, message: &str) -> &mut Self {
        self.call("alert", &[message.into()])
    }

    /// `window.location.href = location;`
    pub fn redirect_to(&mut self, location: &str) -> &mut Self {
        self.assign("window.location.href", &location.into())
    }

    /// Replace the inner markup of element `id` with a rendered template.
    pub fn replace_html(&mut self, id: &str, template: &str) -> Result<&mut Self, BoxError> {
        let view = self
            .view
            .as_ref()
            .ok_or("replace_html requires a view binding")?;
        let html = view.render(template)?;
        Ok(self.call("Element.update", &[id.into(), html.into()]))
    }

    /// Whether no statement has been added.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for ScriptGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}
