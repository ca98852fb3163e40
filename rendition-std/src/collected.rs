//! Renderers submitted by add-on crates via `inventory`.
//!
//! ```rust,ignore
//! fn csv(value: &Value, _: &Options, ctx: &mut RenderContext) -> Result<(), BoxError> {
//!     ctx.default_content_type("text/csv");
//!     ctx.set_response_body(value.passthrough().unwrap_or_default());
//!     Ok(())
//! }
//!
//! inventory::submit! { RendererRegistration::new("csv", csv) }
//!
//! RendererRegistry::global().install_submitted();
//! ```

use crate::registry::RendererRegistry;
use rendition_core::{BoxError, Options, RenderContext, Value};

/// Signature of a submitted renderer.
pub type RenderFn = fn(&Value, &Options, &mut RenderContext) -> Result<(), BoxError>;

/// A renderer submitted for collection.
pub struct RendererRegistration {
    /// Registry name.
    pub name: &'static str,
    /// The renderer function.
    pub renderer: RenderFn,
}

impl RendererRegistration {
    /// Create a registration entry.
    pub const fn new(name: &'static str, renderer: RenderFn) -> Self {
        Self { name, renderer }
    }
}

inventory::collect!(RendererRegistration);

impl RendererRegistry {
    /// Register every submitted renderer, sorted by name so the baseline
    /// order does not depend on link order. Returns how many were installed.
    pub fn install_submitted(&self) -> usize {
        let mut entries: Vec<&RendererRegistration> =
            inventory::iter::<RendererRegistration>.into_iter().collect();
        entries.sort_by_key(|entry| entry.name);

        for entry in &entries {
            self.register(entry.name, entry.renderer);
        }
        entries.len()
    }
}
