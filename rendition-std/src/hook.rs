//! First-chance render hook.
//!
//! The rendering pipeline consults a component's renderers before its
//! default rendering: if an enabled renderer's key is present the renderer
//! produces the body, otherwise the fallback runs.

use crate::component::RendererSet;
use rendition_core::{BoxError, DispatchError, DispatchOutcome, Options, RenderContext, Rendered};
use std::sync::Arc;

/// A [`RendererSet`] paired with the default rendering it falls back to.
pub struct RenderHook<F> {
    renderers: Arc<RendererSet>,
    fallback: F,
}

impl<F> RenderHook<F>
where
    F: Fn(&Options, &mut RenderContext) -> Result<Rendered, BoxError> + Send + Sync,
{
    /// Pair `renderers` with the default rendering `fallback`.
    pub fn new(renderers: Arc<RendererSet>, fallback: F) -> Self {
        Self {
            renderers,
            fallback,
        }
    }

    /// Render through the first matching renderer, or the fallback.
    ///
    /// Fallback failures are reported like renderer failures, unchanged.
    pub fn render_to_body(
        &self,
        options: &Options,
        ctx: &mut RenderContext,
    ) -> Result<Rendered, DispatchError> {
        match self.renderers.dispatch(options, ctx)? {
            DispatchOutcome::Handled(rendered) => Ok(rendered),
            DispatchOutcome::Unhandled => {
                #[cfg(feature = "tracing")]
                tracing::trace!(component = self.renderers.label(), "falling back to default rendering");
                (self.fallback)(options, ctx).map_err(DispatchError::Renderer)
            }
        }
    }

    /// The wrapped renderer set.
    pub fn renderers(&self) -> &Arc<RendererSet> {
        &self.renderers
    }

    /// Unwrap the renderer set, dropping the fallback.
    pub fn into_inner(self) -> Arc<RendererSet> {
        self.renderers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RendererRegistry;
    use serde_json::json;

    fn template(_: &Options, ctx: &mut RenderContext) -> Result<Rendered, BoxError> {
        ctx.default_content_type("text/html");
        ctx.set_response_body("<html/>");
        Ok(Rendered::from_context(ctx))
    }

    fn hook() -> RenderHook<fn(&Options, &mut RenderContext) -> Result<Rendered, BoxError>> {
        let registry = Arc::new(RendererRegistry::with_builtins());
        let set = Arc::new(RendererSet::baseline(&registry));
        RenderHook::new(set, template)
    }

    #[test]
    fn matched_renderer_wins_over_fallback() {
        let rendered = hook()
            .render_to_body(&Options::new().with("json", json!([1])), &mut RenderContext::new())
            .unwrap();
        assert_eq!(rendered.body, "[1]");
    }

    #[test]
    fn unmatched_options_fall_back() {
        let rendered = hook()
            .render_to_body(&Options::new().with("template", "show"), &mut RenderContext::new())
            .unwrap();
        assert_eq!(rendered.content_type.as_deref(), Some("text/html"));
        assert_eq!(rendered.body, "<html/>");
    }
}
