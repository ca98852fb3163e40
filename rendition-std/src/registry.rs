//! # Global Renderer Registry
//!
//! The process-wide table of every known renderer, in registration order.
//!
//! Readers work against an immutable [`RegistrySnapshot`] published through
//! an [`ArcSwap`]. Every registration builds a new snapshot and swaps it in
//! with a read-copy-update loop, so registrations made after serving has
//! started are visible to the next dispatch on any thread, and no reader
//! ever sees a half-applied update.
//!
//! Each publication bumps the snapshot's generation. Compiled dispatch
//! routines remember the generation they were built against and rebuild
//! themselves when it moves (see [`RendererSet`](crate::component::RendererSet)).

use crate::renderers;
use arc_swap::ArcSwap;
use rendition_core::{Renderer, RendererName, SharedRenderer};
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock},
};

static GLOBAL: LazyLock<Arc<RendererRegistry>> =
    LazyLock::new(|| Arc::new(RendererRegistry::with_builtins()));

/// What a registration did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAction {
    /// The name was new and was appended to the baseline.
    Added,
    /// The name existed; its function was replaced in place.
    Replaced,
}

/// An immutable view of the registry at one generation.
#[derive(Clone, Default)]
pub struct RegistrySnapshot {
    entries: Vec<(RendererName, SharedRenderer)>,
    index: HashMap<RendererName, usize>,
    generation: u64,
}

impl RegistrySnapshot {
    /// Look up a renderer by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&SharedRenderer> {
        self.index.get(name).map(|&pos| &self.entries[pos].1)
    }

    #[inline]
    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The interned name for `name`, if registered.
    pub fn name(&self, name: &str) -> Option<&RendererName> {
        self.index.get(name).map(|&pos| &self.entries[pos].0)
    }

    /// Baseline names: every registered name, in first-registration order.
    pub fn baseline(&self) -> impl Iterator<Item = &RendererName> {
        self.entries.iter().map(|(name, _)| name)
    }

    /// Publication counter; bumped on every registration.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of registered renderers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no renderer is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: RendererName, renderer: SharedRenderer) -> RegisterAction {
        self.generation += 1;
        match self.index.get(&name) {
            Some(&pos) => {
                self.entries[pos].1 = renderer;
                RegisterAction::Replaced
            }
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, renderer));
                RegisterAction::Added
            }
        }
    }
}

impl std::fmt::Debug for RegistrySnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrySnapshot")
            .field("names", &self.baseline().collect::<Vec<_>>())
            .field("generation", &self.generation)
            .finish()
    }
}

/// An ordered, thread-safe mapping from renderer name to renderer.
///
/// # Example
///
/// ```rust,ignore
/// let registry = RendererRegistry::with_builtins();
/// registry.register("csv", renderer_fn(|value, _options, ctx| {
///     ctx.default_content_type("text/csv");
///     ctx.set_response_body(value.passthrough().unwrap_or_default());
///     Ok(())
/// }));
/// assert!(registry.lookup("csv").is_some());
/// ```
pub struct RendererRegistry {
    snap: ArcSwap<RegistrySnapshot>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            snap: ArcSwap::from_pointee(RegistrySnapshot::default()),
        }
    }

    /// Create a registry holding the built-in renderers
    /// (`json`, `js`, `xml`, `update`, in that order).
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        renderers::install(&registry);
        registry
    }

    /// The process-wide registry, seeded with the built-ins on first access.
    pub fn global() -> Arc<RendererRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Register `renderer` under `name`.
    ///
    /// A new name is appended to the baseline. An existing name keeps its
    /// position and only its function is replaced.
    pub fn register<R: Renderer>(&self, name: impl Into<RendererName>, renderer: R) -> RegisterAction {
        self.register_shared(name, Arc::new(renderer))
    }

    /// Register an already shared renderer.
    pub fn register_shared(
        &self,
        name: impl Into<RendererName>,
        renderer: SharedRenderer,
    ) -> RegisterAction {
        let name = name.into();
        let mut action = RegisterAction::Added;
        let previous = self.snap.rcu(|cur| {
            let mut next = RegistrySnapshot::clone(cur);
            action = next.insert(name.clone(), Arc::clone(&renderer));
            next
        });

        #[cfg(feature = "tracing")]
        {
            let generation = previous.generation + 1;
            match action {
                RegisterAction::Added => {
                    tracing::debug!(renderer = %name, generation, "renderer registered");
                }
                RegisterAction::Replaced => {
                    tracing::warn!(renderer = %name, generation, "renderer replaced");
                }
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = previous;
        }

        action
    }

    /// Look up the renderer registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<SharedRenderer> {
        self.snap.load().get(name).cloned()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.snap.load().contains(name)
    }

    /// Baseline names in registration order.
    pub fn names(&self) -> Vec<RendererName> {
        self.snap.load().baseline().cloned().collect()
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.snap.load_full()
    }

    /// Generation of the currently published snapshot.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.snap.load().generation
    }

    /// Number of registered renderers.
    pub fn len(&self) -> usize {
        self.snap.load().len()
    }

    /// Whether no renderer is registered.
    pub fn is_empty(&self) -> bool {
        self.snap.load().is_empty()
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RendererRegistry")
            .field(&*self.snap.load())
            .finish()
    }
}
