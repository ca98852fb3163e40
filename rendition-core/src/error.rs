//! Error types for Rendition.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RenditionError`] - Top-level error type for all Rendition operations
//! - [`CompositionError`] - Errors while configuring a component's renderer set
//! - [`DispatchError`] - Errors during render-time dispatch

use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// This is the failure type of every [`Renderer`](crate::Renderer).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Rendition operations.
#[derive(Error, Debug)]
pub enum RenditionError {
    /// An error occurred while composing a renderer set.
    #[error("composition error: {0}")]
    Composition(#[from] CompositionError),

    /// An error occurred during dispatch.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Errors raised while a component enables renderers.
///
/// These surface at configuration time, before any request reaches dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    /// The name is not present in the registry.
    #[error("unknown renderer: {0}")]
    UnknownRenderer(String),
}

/// Errors that can occur while dispatching an options mapping.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The options argument is not a key-value mapping, or a generic
    /// response key carries a value of the wrong shape.
    #[error("invalid render options: {0}")]
    InvalidOptions(String),

    /// The matched renderer failed. The renderer's own error is passed through.
    #[error(transparent)]
    Renderer(BoxError),
}

impl DispatchError {
    /// Returns the renderer's own error, if this is a renderer failure.
    pub fn renderer_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            DispatchError::Renderer(err) => Some(err.as_ref()),
            DispatchError::InvalidOptions(_) => None,
        }
    }

    /// Consumes the error, returning the renderer's own error unchanged.
    pub fn into_renderer_error(self) -> Result<BoxError, Self> {
        match self {
            DispatchError::Renderer(err) => Ok(err),
            other => Err(other),
        }
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Renderer(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("encoder exploded")]
    struct Exploded;

    #[test]
    fn renderer_error_is_transparent() {
        let err = DispatchError::from(Box::new(Exploded) as BoxError);
        assert_eq!(err.to_string(), "encoder exploded");
        assert!(err.renderer_error().unwrap().is::<Exploded>());

        let inner = err.into_renderer_error().unwrap();
        assert!(inner.downcast_ref::<Exploded>().is_some());
    }

    #[test]
    fn composition_error_lifts_into_top_level() {
        let err: RenditionError = CompositionError::UnknownRenderer("bogus".into()).into();
        assert_eq!(err.to_string(), "composition error: unknown renderer: bogus");
    }
}
