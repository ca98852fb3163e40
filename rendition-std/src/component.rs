//! # Component Renderer Sets
//!
//! Each component (a controller class, a route group, ...) owns a
//! [`RendererSet`]: the ordered subset of registry names it has enabled,
//! together with the dispatch routine compiled from them.
//!
//! # Composition
//!
//! A set is configured explicitly when it is built:
//!
//! - **Inherit**: copy a parent set's current names. The copy is
//!   independent; later changes on either side do not propagate.
//! - **Subscribe to the baseline**: track every renderer the registry
//!   knows, including ones registered later.
//! - **Enable**: append names, in order. Re-enabling a name keeps its
//!   original position.
//!
//! ```rust,ignore
//! let base = RendererSet::builder(&registry)
//!     .label("ApiController")
//!     .enable(["json", "xml"])
//!     .build()?;
//!
//! let child = RendererSet::builder(&registry)
//!     .label("ItemsController")
//!     .inherit(&base)
//!     .enable(["update"])
//!     .build()?;
//! ```
//!
//! # Staleness
//!
//! The compiled routine is rebuilt after every successful enable, and
//! lazily on the dispatch path whenever the registry has published a newer
//! snapshot, so callers never dispatch through a replaced function or miss
//! a baseline renderer registered late.

use crate::{
    dispatch::CompiledDispatch,
    registry::{RegistrySnapshot, RendererRegistry},
};
use arc_swap::ArcSwap;
use rendition_core::{
    CompositionError, DispatchError, DispatchOutcome, Options, RenderContext, RendererName,
};
use std::sync::Arc;

const ANONYMOUS: &str = "anonymous";

/// A component's ordered set of enabled renderers.
pub struct RendererSet {
    registry: Arc<RendererRegistry>,
    label: Arc<str>,
    enabled: Vec<RendererName>,
    subscribed: bool,
    compiled: ArcSwap<CompiledDispatch>,
}

impl RendererSet {
    /// Start configuring a set against `registry`.
    pub fn builder(registry: &Arc<RendererRegistry>) -> RendererSetBuilder {
        RendererSetBuilder::new(registry)
    }

    /// An empty set; dispatch is always `Unhandled` until names are enabled.
    pub fn empty(registry: &Arc<RendererRegistry>) -> Self {
        Self::assemble(Arc::clone(registry), ANONYMOUS.into(), Vec::new(), false)
    }

    /// A set subscribed to the registry's baseline: every registered
    /// renderer, in registration order, now and in the future.
    pub fn baseline(registry: &Arc<RendererRegistry>) -> Self {
        Self::assemble(Arc::clone(registry), "baseline".into(), Vec::new(), true)
    }

    /// A new, unlabelled set holding a snapshot of this set's current names.
    ///
    /// The child does not subscribe to the baseline; use
    /// [`RendererSetBuilder::subscribe_baseline`] for that.
    pub fn inherit(&self) -> Self {
        let snapshot = self.registry.snapshot();
        Self::assemble(
            Arc::clone(&self.registry),
            ANONYMOUS.into(),
            self.effective_names(&snapshot),
            false,
        )
    }

    fn assemble(
        registry: Arc<RendererRegistry>,
        label: Arc<str>,
        enabled: Vec<RendererName>,
        subscribed: bool,
    ) -> Self {
        let set = Self {
            registry,
            label,
            enabled,
            subscribed,
            compiled: ArcSwap::from_pointee(CompiledDispatch::default()),
        };
        set.recompile();
        set
    }

    /// Enable `names` in order.
    ///
    /// Every name is checked against the registry first; if any is unknown
    /// the set is left unchanged and [`CompositionError::UnknownRenderer`]
    /// is returned. Already enabled names keep their position.
    pub fn enable_renderers<I, S>(&mut self, names: I) -> Result<(), CompositionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let snapshot = self.registry.snapshot();
        let resolved = resolve(&snapshot, names)?;

        let current = self.effective_names(&snapshot);
        let mut changed = false;
        for name in resolved {
            if !current.contains(&name) && !self.enabled.contains(&name) {
                self.enabled.push(name);
                changed = true;
            }
        }

        if changed {
            #[cfg(feature = "tracing")]
            tracing::debug!(component = %self.label, enabled = ?self.enabled, "renderers enabled");
            self.recompile();
        }
        Ok(())
    }

    /// Enable a single renderer.
    pub fn enable_renderer(&mut self, name: &str) -> Result<(), CompositionError> {
        self.enable_renderers([name])
    }

    /// Run the first enabled renderer whose name is a key of `options`.
    ///
    /// See [`CompiledDispatch::dispatch`].
    pub fn dispatch(
        &self,
        options: &Options,
        ctx: &mut RenderContext,
    ) -> Result<DispatchOutcome, DispatchError> {
        self.compiled().dispatch(options, ctx)
    }

    /// Dispatch loosely typed options.
    ///
    /// See [`CompiledDispatch::dispatch_json`].
    pub fn dispatch_json(
        &self,
        options: serde_json::Value,
        ctx: &mut RenderContext,
    ) -> Result<DispatchOutcome, DispatchError> {
        self.compiled().dispatch_json(options, ctx)
    }

    /// The dispatch routine for the registry's current snapshot,
    /// rebuilding it first if the registry has moved on.
    pub fn compiled(&self) -> Arc<CompiledDispatch> {
        let compiled = self.compiled.load_full();
        if compiled.generation() == self.registry.generation() {
            return compiled;
        }
        self.recompile()
    }

    /// Rebuild and publish the dispatch routine.
    pub fn recompile(&self) -> Arc<CompiledDispatch> {
        let snapshot = self.registry.snapshot();
        let names = self.effective_names(&snapshot);
        let compiled = Arc::new(CompiledDispatch::compile(&names, &snapshot));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            component = %self.label,
            renderers = ?names,
            generation = compiled.generation(),
            "render dispatch compiled"
        );

        self.compiled.store(Arc::clone(&compiled));
        compiled
    }

    /// Current names, in dispatch order.
    pub fn enabled_names(&self) -> Vec<RendererName> {
        self.effective_names(&self.registry.snapshot())
    }

    /// Whether `name` is among the current names.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled_names().iter().any(|n| &**n == name)
    }

    /// Whether this set tracks the registry's baseline.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// The label used in log output.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The registry names are resolved against.
    pub fn registry(&self) -> &Arc<RendererRegistry> {
        &self.registry
    }

    // Baseline first (when subscribed), then explicit names not already present.
    fn effective_names(&self, snapshot: &RegistrySnapshot) -> Vec<RendererName> {
        if !self.subscribed {
            return self.enabled.clone();
        }
        let mut names: Vec<RendererName> = snapshot.baseline().cloned().collect();
        for name in &self.enabled {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }
}

impl std::fmt::Debug for RendererSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererSet")
            .field("label", &self.label)
            .field("enabled", &self.enabled_names())
            .field("subscribed", &self.subscribed)
            .finish()
    }
}

/// Builder for constructing a [`RendererSet`].
pub struct RendererSetBuilder {
    registry: Arc<RendererRegistry>,
    label: Option<Arc<str>>,
    inherited: Vec<RendererName>,
    subscribed: bool,
    enable: Vec<String>,
}

impl RendererSetBuilder {
    /// Create a builder for an empty, unsubscribed set.
    pub fn new(registry: &Arc<RendererRegistry>) -> Self {
        Self {
            registry: Arc::clone(registry),
            label: None,
            inherited: Vec::new(),
            subscribed: false,
            enable: Vec::new(),
        }
    }

    /// Name the component in log output.
    pub fn label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Start from a snapshot of `parent`'s current names.
    pub fn inherit(mut self, parent: &RendererSet) -> Self {
        self.inherited = parent.enabled_names();
        self
    }

    /// Track the registry's baseline, including renderers registered later.
    pub fn subscribe_baseline(mut self) -> Self {
        self.subscribed = true;
        self
    }

    /// Enable `names` after any inherited ones.
    pub fn enable<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enable.extend(names.into_iter().map(Into::into));
        self
    }

    /// Build the set, compiling its dispatch routine.
    ///
    /// Fails with [`CompositionError::UnknownRenderer`] if any name given to
    /// [`enable`](Self::enable) is not registered.
    pub fn build(self) -> Result<RendererSet, CompositionError> {
        let snapshot = self.registry.snapshot();
        let mut enabled = self.inherited;
        for name in resolve(&snapshot, &self.enable)? {
            if !enabled.contains(&name) {
                enabled.push(name);
            }
        }
        let label = self.label.unwrap_or_else(|| ANONYMOUS.into());
        Ok(RendererSet::assemble(
            self.registry,
            label,
            enabled,
            self.subscribed,
        ))
    }
}

// Resolve every name or fail on the first unknown one.
fn resolve<I, S>(snapshot: &RegistrySnapshot, names: I) -> Result<Vec<RendererName>, CompositionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            snapshot.name(name).cloned().ok_or_else(|| {
                #[cfg(feature = "tracing")]
                tracing::warn!(renderer = name, "unknown renderer");
                CompositionError::UnknownRenderer(name.to_owned())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRenderer;
    use serde_json::json;

    fn names(set: &RendererSet) -> Vec<String> {
        set.enabled_names().iter().map(|n| n.to_string()).collect()
    }

    fn builtins() -> Arc<RendererRegistry> {
        Arc::new(RendererRegistry::with_builtins())
    }

    #[test]
    fn child_snapshots_parent_and_diverges() {
        let registry = builtins();
        let mut parent = RendererSet::builder(&registry)
            .label("Parent")
            .enable(["json", "xml"])
            .build()
            .unwrap();

        let mut child = RendererSet::builder(&registry)
            .inherit(&parent)
            .build()
            .unwrap();
        assert_eq!(names(&child), ["json", "xml"]);
        assert_eq!(child.label(), "anonymous");
        assert_eq!(parent.label(), "Parent");
        assert_eq!(parent.inherit().label(), "anonymous");

        child.enable_renderers(["update"]).unwrap();
        assert_eq!(names(&child), ["json", "xml", "update"]);
        assert_eq!(names(&parent), ["json", "xml"]);

        parent.enable_renderer("js").unwrap();
        assert_eq!(names(&child), ["json", "xml", "update"]);
    }

    #[test]
    fn unknown_renderer_leaves_set_unchanged() {
        let registry = builtins();
        let mut set = RendererSet::builder(&registry)
            .enable(["json"])
            .build()
            .unwrap();
        let before = set.compiled();

        let err = set.enable_renderers(["xml", "bogus"]).unwrap_err();
        assert_eq!(err, CompositionError::UnknownRenderer("bogus".into()));
        assert_eq!(names(&set), ["json"]);
        assert!(Arc::ptr_eq(&before, &set.compiled()));
    }

    #[test]
    fn builder_rejects_unknown_renderer() {
        let registry = builtins();
        let err = RendererSet::builder(&registry)
            .enable(["bogus"])
            .build()
            .unwrap_err();
        assert_eq!(err, CompositionError::UnknownRenderer("bogus".into()));
    }

    #[test]
    fn reenabling_keeps_position() {
        let registry = builtins();
        let mut set = RendererSet::builder(&registry)
            .enable(["json", "xml"])
            .build()
            .unwrap();
        let before = set.compiled();

        set.enable_renderers(["json"]).unwrap();
        assert_eq!(names(&set), ["json", "xml"]);
        assert!(Arc::ptr_eq(&before, &set.compiled()));
    }

    #[test]
    fn baseline_set_picks_up_late_registrations() {
        let registry = builtins();
        let baseline = RendererSet::baseline(&registry);
        let fixed = RendererSet::builder(&registry)
            .enable(["json"])
            .build()
            .unwrap();
        assert_eq!(names(&baseline), ["json", "js", "xml", "update"]);

        let csv = RecordingRenderer::new("a,b");
        registry.register("csv", csv.clone());

        let options = Options::new().with("csv", json!([["a", "b"]]));
        let outcome = baseline.dispatch(&options, &mut RenderContext::new()).unwrap();
        assert_eq!(outcome.rendered().unwrap().body, "a,b");
        assert_eq!(csv.count(), 1);

        let outcome = fixed.dispatch(&options, &mut RenderContext::new()).unwrap();
        assert_eq!(outcome, DispatchOutcome::Unhandled);
        assert!(!fixed.is_enabled("csv"));
    }

    #[test]
    fn subscribed_set_keeps_extra_names_after_baseline() {
        let registry = Arc::new(RendererRegistry::new());
        registry.register("a", RecordingRenderer::new("a"));
        let mut set = RendererSet::builder(&registry)
            .subscribe_baseline()
            .build()
            .unwrap();
        registry.register("b", RecordingRenderer::new("b"));
        set.enable_renderer("b").unwrap();
        registry.register("c", RecordingRenderer::new("c"));

        assert!(set.is_subscribed());
        assert_eq!(names(&set), ["a", "b", "c"]);
    }

    #[test]
    fn replaced_renderer_is_used_without_reenabling() {
        let registry = builtins();
        let set = RendererSet::builder(&registry)
            .enable(["json"])
            .build()
            .unwrap();

        let replacement = RecordingRenderer::new("replaced");
        registry.register("json", replacement.clone());

        let options = Options::new().with("json", json!({"a": 1}));
        let outcome = set.dispatch(&options, &mut RenderContext::new()).unwrap();
        assert_eq!(outcome.rendered().unwrap().body, "replaced");
        assert_eq!(set.compiled().generation(), registry.generation());
    }

    #[test]
    fn dispatch_from_many_threads_sees_published_renderers() {
        let registry = builtins();
        let set = Arc::new(RendererSet::baseline(&registry));
        registry.register("csv", RecordingRenderer::new("a,b"));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let set = Arc::clone(&set);
                std::thread::spawn(move || {
                    let options = Options::new().with("csv", "x");
                    set.dispatch(&options, &mut RenderContext::new())
                        .unwrap()
                        .into_rendered()
                        .unwrap()
                        .body
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "a,b");
        }
    }

    #[test]
    fn empty_set_never_handles() {
        let registry = builtins();
        let set = RendererSet::empty(&registry);
        let options = Options::new().with("json", json!(1));
        assert_eq!(
            set.dispatch(&options, &mut RenderContext::new()).unwrap(),
            DispatchOutcome::Unhandled
        );
    }
}
