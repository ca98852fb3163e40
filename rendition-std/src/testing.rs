//! Testing utilities for Rendition.
//!
//! - [`RecordingRenderer`]: a renderer that records every call it receives
//! - [`FailingRenderer`]: a renderer that always fails

use rendition_core::{BoxError, Options, RenderContext, Renderer, Value};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// One call observed by a [`RecordingRenderer`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The value passed to the renderer.
    pub value: Value,
    /// Keys of the options mapping, sorted.
    pub option_keys: Vec<String>,
}

/// A renderer that records its calls and writes a fixed body.
///
/// Clones share the same record, so a test can keep one handle and register
/// the other.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingRenderer::new("csv body");
/// registry.register("csv", recorder.clone());
///
/// set.dispatch(&Options::new().with("csv", "x"), &mut ctx)?;
/// assert_eq!(recorder.count(), 1);
/// ```
#[derive(Clone)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    body: Arc<str>,
}

impl RecordingRenderer {
    /// Create a recorder that sets `body` as the response body.
    pub fn new(body: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            body: body.into(),
        }
    }

    /// A copy of the recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Renderer for RecordingRenderer {
    fn render(
        &self,
        value: &Value,
        options: &Options,
        ctx: &mut RenderContext,
    ) -> Result<(), BoxError> {
        let mut option_keys: Vec<String> = options.iter().map(|(k, _)| k.to_owned()).collect();
        option_keys.sort();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                value: value.clone(),
                option_keys,
            });
        ctx.set_response_body(&*self.body);
        Ok(())
    }
}

/// The error produced by [`FailingRenderer`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RenderFailure(pub String);

/// A renderer that always fails with [`RenderFailure`].
#[derive(Clone, Debug)]
pub struct FailingRenderer {
    message: String,
}

impl FailingRenderer {
    /// Create a renderer failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Renderer for FailingRenderer {
    fn render(&self, _: &Value, _: &Options, _: &mut RenderContext) -> Result<(), BoxError> {
        Err(Box::new(RenderFailure(self.message.clone())))
    }
}
