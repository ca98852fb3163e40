//! # rendition - Pluggable Response Renderers
//!
//! `rendition` lets a web framework register named rendering strategies
//! once, globally, and compose them per component into an ordered dispatch
//! routine that runs as a first-chance hook before default rendering.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rendition::prelude::*;
//! use serde_json::json;
//!
//! let registry = RendererRegistry::global();
//! let api = RendererSet::builder(&registry)
//!     .label("ApiController")
//!     .enable(["json", "xml"])
//!     .build()?;
//!
//! let mut ctx = RenderContext::new();
//! let options = Options::new().with("json", json!({"a": 1})).with("callback", "cb");
//! match api.dispatch(&options, &mut ctx)? {
//!     DispatchOutcome::Handled(rendered) => assert_eq!(rendered.body, r#"cb({"a":1})"#),
//!     DispatchOutcome::Unhandled => { /* default rendering */ }
//! }
//! ```
//!
//! ## Add-ons
//!
//! Framework add-ons extend the process-wide registry with [`add_renderer`].
//! Components built with [`RendererSet::baseline`] pick the new renderer up
//! on their next dispatch; components with a fixed list opt in with
//! [`RendererSet::enable_renderer`].

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use rendition_core::{
    // Error types
    BoxError,
    CompositionError,
    DispatchError,
    // Outcomes
    DispatchOutcome,
    // Options and context
    Options,
    RenderContext,
    Rendered,
    // Renderer
    Renderer,
    RendererName,
    RenditionError,
    ScriptBlock,
    ScriptGenerator,
    Serializable,
    SharedRenderer,
    // Values
    Value,
    ViewContext,
    mime,
    renderer_fn,
};

pub use rendition_std::{
    CompiledDispatch, RegisterAction, RegistrySnapshot, RenderHook, RendererRegistry, RendererSet,
    RendererSetBuilder,
};

/// Built-in renderers.
pub mod renderers {
    pub use rendition_std::renderers::{
        BUILTINS, BuiltinError, JS, JSON, UPDATE, XML, install, js, json, update, xml,
    };
}

/// Testing utilities.
pub mod testing {
    pub use rendition_std::testing::{FailingRenderer, RecordedCall, RecordingRenderer, RenderFailure};
}

/// Add-on collection through `inventory`.
#[cfg(feature = "inventory")]
pub mod collected {
    pub use rendition_std::collected::{RenderFn, RendererRegistration};
}

/// Register `renderer` under `name` in the process-wide registry.
///
/// A new name joins the baseline: every component subscribed to it uses the
/// renderer from its next dispatch on.
pub fn add_renderer<R: Renderer>(name: impl Into<RendererName>, renderer: R) -> RegisterAction {
    RendererRegistry::global().register(name, renderer)
}

/// Look up a renderer in the process-wide registry.
pub fn lookup_renderer(name: &str) -> Option<SharedRenderer> {
    RendererRegistry::global().lookup(name)
}

/// Prelude module - common imports for Rendition.
///
/// # Usage
///
/// ```rust,ignore
/// use rendition::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, CompositionError, DispatchError, DispatchOutcome, Options, RenderContext,
        RenderHook, Rendered, Renderer, RendererRegistry, RendererSet, Serializable, Value,
        add_renderer, renderer_fn,
    };
}

#[cfg(feature = "inventory")]
pub use inventory;
