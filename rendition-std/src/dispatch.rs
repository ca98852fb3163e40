//! # Compiled Dispatch
//!
//! A dispatch routine bound to one snapshot of a component's enabled
//! renderer names.
//!
//! Compilation resolves each enabled name against a registry snapshot once,
//! producing an ordered list of `(name, renderer)` pairs. Dispatch walks that
//! list in enable order and runs the first renderer whose name is a key of
//! the options mapping, so the cost is proportional to the number of enabled
//! names checked, never to the size of the registry.

use crate::registry::RegistrySnapshot;
use rendition_core::{
    DispatchError, DispatchOutcome, Options, RenderContext, Rendered, RendererName,
    SharedRenderer,
};

/// An ordered dispatch routine over a fixed set of renderers.
#[derive(Clone, Default)]
pub struct CompiledDispatch {
    routes: Vec<(RendererName, SharedRenderer)>,
    generation: u64,
}

impl CompiledDispatch {
    /// Resolve `names` against `snapshot`, keeping their order.
    ///
    /// Names missing from the snapshot are skipped; callers validate names
    /// when they are enabled and the registry never forgets a name.
    pub fn compile<'a>(
        names: impl IntoIterator<Item = &'a RendererName>,
        snapshot: &RegistrySnapshot,
    ) -> Self {
        let routes = names
            .into_iter()
            .filter_map(|name| {
                snapshot
                    .get(name)
                    .map(|renderer| (name.clone(), renderer.clone()))
            })
            .collect();
        Self {
            routes,
            generation: snapshot.generation(),
        }
    }

    /// Run the first enabled renderer whose name is present in `options`.
    ///
    /// Generic response keys (`status`, `content_type`, `location`) are
    /// applied to `ctx` before the matched renderer runs. When nothing
    /// matches, `ctx` is left untouched and [`DispatchOutcome::Unhandled`]
    /// is returned. A renderer's own failure is returned unchanged as
    /// [`DispatchError::Renderer`].
    pub fn dispatch(
        &self,
        options: &Options,
        ctx: &mut RenderContext,
    ) -> Result<DispatchOutcome, DispatchError> {
        for (name, renderer) in &self.routes {
            let Some(value) = options.get(name) else {
                continue;
            };

            #[cfg(feature = "tracing")]
            tracing::debug!(renderer = %name, "render option matched");
            #[cfg(not(feature = "tracing"))]
            let _ = name;

            process_options(options, ctx)?;
            renderer
                .render(value, options, ctx)
                .map_err(DispatchError::Renderer)?;
            return Ok(DispatchOutcome::Handled(Rendered::from_context(ctx)));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(checked = self.routes.len(), "no render option matched");

        Ok(DispatchOutcome::Unhandled)
    }

    /// Dispatch loosely typed options; anything but a JSON object fails
    /// with [`DispatchError::InvalidOptions`].
    pub fn dispatch_json(
        &self,
        options: serde_json::Value,
        ctx: &mut RenderContext,
    ) -> Result<DispatchOutcome, DispatchError> {
        let options = Options::try_from(options)?;
        self.dispatch(&options, ctx)
    }

    /// Names in dispatch order.
    pub fn names(&self) -> impl Iterator<Item = &RendererName> {
        self.routes.iter().map(|(name, _)| name)
    }

    /// Registry generation this routine was compiled against.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of renderers checked per dispatch.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether nothing can ever match.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl std::fmt::Debug for CompiledDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledDispatch")
            .field("names", &self.names().collect::<Vec<_>>())
            .field("generation", &self.generation)
            .finish()
    }
}

// Apply the response keys every render option understands.
fn process_options(options: &Options, ctx: &mut RenderContext) -> Result<(), DispatchError> {
    if let Some(status) = options.status()? {
        ctx.set_status(status);
    }
    if let Some(content_type) = options.content_type()? {
        ctx.set_content_type(content_type);
    }
    if let Some(location) = options.location()? {
        ctx.set_location(location);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{registry::RendererRegistry, testing::RecordingRenderer};
    use serde_json::json;

    fn compiled(registry: &RendererRegistry, names: &[&str]) -> CompiledDispatch {
        let snapshot = registry.snapshot();
        let names: Vec<RendererName> = names.iter().map(|&n| n.into()).collect();
        CompiledDispatch::compile(&names, &snapshot)
    }

    #[test]
    fn enable_order_decides_precedence() {
        let registry = RendererRegistry::with_builtins();
        let dispatch = compiled(&registry, &["json", "xml"]);
        let options = Options::new()
            .with("xml", json!("<a/>"))
            .with("json", json!({"a": 1}));

        let mut ctx = RenderContext::new();
        let outcome = dispatch.dispatch(&options, &mut ctx).unwrap();
        assert_eq!(
            outcome.rendered().unwrap().content_type.as_deref(),
            Some("application/json")
        );

        let dispatch = compiled(&registry, &["xml", "json"]);
        let mut ctx = RenderContext::new();
        let outcome = dispatch.dispatch(&options, &mut ctx).unwrap();
        assert_eq!(outcome.rendered().unwrap().body, "<a/>");
    }

    #[test]
    fn only_the_first_match_runs() {
        let registry = RendererRegistry::new();
        let first = RecordingRenderer::new("first");
        let second = RecordingRenderer::new("second");
        registry.register("a", first.clone());
        registry.register("b", second.clone());

        let dispatch = compiled(&registry, &["a", "b"]);
        let options = Options::new().with("a", "1").with("b", "2");
        dispatch.dispatch(&options, &mut RenderContext::new()).unwrap();

        assert_eq!(first.count(), 1);
        assert_eq!(second.count(), 0);
    }

    #[test]
    fn unmatched_options_leave_context_untouched() {
        let registry = RendererRegistry::with_builtins();
        let dispatch = compiled(&registry, &["json"]);
        let mut ctx = RenderContext::new();

        let options = Options::new().with("unrelated_key", json!(1)).with("status", json!(201));
        assert_eq!(dispatch.dispatch(&options, &mut ctx).unwrap(), DispatchOutcome::Unhandled);
        assert_eq!(ctx.status(), None);
        assert_eq!(ctx.response_body(), None);
    }

    #[test]
    fn disabled_names_are_ignored() {
        let registry = RendererRegistry::with_builtins();
        let dispatch = compiled(&registry, &["json"]);
        let options = Options::new().with("xml", "<a/>");
        let outcome = dispatch.dispatch(&options, &mut RenderContext::new()).unwrap();
        assert!(!outcome.is_handled());
    }

    #[test]
    fn response_keys_apply_before_rendering() {
        let registry = RendererRegistry::with_builtins();
        let dispatch = compiled(&registry, &["json"]);
        let options = Options::new()
            .with("json", json!([1]))
            .with("status", json!(201))
            .with("location", "/items/1")
            .with("content_type", "application/vnd.api+json");

        let mut ctx = RenderContext::new();
        let rendered = dispatch
            .dispatch(&options, &mut ctx)
            .unwrap()
            .into_rendered()
            .unwrap();
        assert_eq!(rendered.content_type.as_deref(), Some("application/vnd.api+json"));
        assert_eq!(rendered.body, "[1]");
        assert_eq!(ctx.status(), Some(201));
        assert_eq!(ctx.location(), Some("/items/1"));
    }

    #[test]
    fn non_mapping_options_are_rejected() {
        let registry = RendererRegistry::with_builtins();
        let dispatch = compiled(&registry, &["json"]);
        let err = dispatch
            .dispatch_json(json!("json"), &mut RenderContext::new())
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidOptions(_)));
    }

    #[test]
    fn compile_records_generation_and_order() {
        let registry = RendererRegistry::with_builtins();
        let dispatch = compiled(&registry, &["update", "json"]);
        let names: Vec<_> = dispatch.names().map(|n| n.to_string()).collect();
        assert_eq!(names, ["update", "json"]);
        assert_eq!(dispatch.generation(), registry.generation());
    }
}
