//! # rendition-core
//!
//! Core traits and types for the Rendition response renderer registry.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! add-ons that only need to define renderers, without depending on the
//! registry implementation in `rendition-std`.
//!
//! # Vocabulary
//!
//! - [`Renderer`] - a named strategy writing a content type and body into a
//!   [`RenderContext`]
//! - [`Options`] - the mapping handed to dispatch; keys are renderer names
//!   plus renderer-specific extras
//! - [`Value`] - an option value with explicit serialization capabilities
//!   ([`Serializable`]) or a [`ScriptBlock`] for script generation
//! - [`DispatchOutcome`] - `Handled` with the [`Rendered`] output, or
//!   `Unhandled` so the caller can fall back to default rendering
//!
//! # Error Types
//!
//! - [`RenditionError`] - Top-level error type
//! - [`CompositionError`] - Enable-time errors
//! - [`DispatchError`] - Render-time errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
pub mod mime;
mod options;
mod renderer;
mod response;
mod script;
mod value;

// Re-exports
pub use context::{RenderContext, ViewContext};
pub use error::{BoxError, CompositionError, DispatchError, RenditionError};
pub use options::{CALLBACK, CONTENT_TYPE, LOCATION, Options, STATUS};
pub use renderer::{Renderer, RendererName, SharedRenderer, renderer_fn};
pub use response::{DispatchOutcome, Rendered};
pub use script::ScriptGenerator;
pub use value::{ScriptBlock, Serializable, Value};
