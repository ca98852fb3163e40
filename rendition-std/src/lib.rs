//! # rendition-std
//!
//! Standard implementations for the Rendition renderer registry.
//!
//! This crate provides:
//! - **Registry**: [`RendererRegistry`], the ordered, snapshot-published
//!   table of renderers, and its process-wide instance
//! - **Built-in renderers**: `json`, `js`, `xml`, `update`
//! - **Composition**: [`RendererSet`], a component's ordered enabled subset
//! - **Dispatch**: [`CompiledDispatch`], the per-set routine run at render time
//! - **Hook**: [`RenderHook`], dispatch with a default-rendering fallback

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use rendition_core;

// Modules
#[cfg(feature = "inventory")]
pub mod collected;
pub mod component;
pub mod dispatch;
pub mod hook;
pub mod registry;
pub mod renderers;
pub mod testing;

pub use component::{RendererSet, RendererSetBuilder};
pub use dispatch::CompiledDispatch;
pub use hook::RenderHook;
pub use registry::{RegisterAction, RegistrySnapshot, RendererRegistry};

#[cfg(feature = "inventory")]
pub use inventory;
