//! # Renderer
//!
//! A renderer is a named strategy that turns one option value into a content
//! type and a response body.
//!
//! Renderers are synchronous. They receive the value stored under their own
//! name, the full options mapping (to read auxiliary keys such as
//! `callback`), and the context they write into.
//!
//! # Example
//!
//! ```rust,ignore
//! registry.register("csv", renderer_fn(|value, _options, ctx| {
//!     ctx.default_content_type("text/csv");
//!     ctx.set_response_body(value.passthrough().unwrap_or_default());
//!     Ok(())
//! }));
//! ```

use crate::{context::RenderContext, error::BoxError, options::Options, value::Value};
use std::sync::Arc;

/// Symbolic identifier of a renderer, unique within a registry.
pub type RendererName = Arc<str>;

/// A shared, type-erased renderer as stored in a registry.
pub type SharedRenderer = Arc<dyn Renderer>;

/// A rendering strategy.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Renderer`",
    label = "missing `Renderer` implementation",
    note = "Renderers take `(&Value, &Options, &mut RenderContext)` and return `Result<(), BoxError>`."
)]
pub trait Renderer: Send + Sync + 'static {
    /// Write the rendering of `value` into `ctx`.
    fn render(&self, value: &Value, options: &Options, ctx: &mut RenderContext)
    -> Result<(), BoxError>;
}

// Plain functions and closures are renderers.
impl<F> Renderer for F
where
    F: Fn(&Value, &Options, &mut RenderContext) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn render(
        &self,
        value: &Value,
        options: &Options,
        ctx: &mut RenderContext,
    ) -> Result<(), BoxError> {
        self(value, options, ctx)
    }
}

/// Build a renderer from a closure, letting the compiler infer its
/// argument and return types.
pub fn renderer_fn<F>(f: F) -> F
where
    F: Fn(&Value, &Options, &mut RenderContext) -> Result<(), BoxError> + Send + Sync + 'static,
{
    f
}
