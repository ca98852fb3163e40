//! # Render Context
//!
//! The mutable response state a renderer writes into.
//!
//! The surrounding request pipeline owns the context; dispatch only sets the
//! content type, body and the generic response fields named in the options.

use crate::error::BoxError;
use std::{fmt, sync::Arc};

/// The view binding a script generator renders templates through.
pub trait ViewContext: Send + Sync + fmt::Debug {
    /// Render a template or partial to markup.
    fn render(&self, template: &str) -> Result<String, BoxError>;
}

/// Mutable response state for a single render.
#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    content_type: Option<String>,
    response_body: Option<String>,
    status: Option<u16>,
    location: Option<String>,
    view: Option<Arc<dyn ViewContext>>,
}

impl RenderContext {
    /// Create an empty context with no view binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context bound to a view.
    pub fn with_view(view: Arc<dyn ViewContext>) -> Self {
        Self {
            view: Some(view),
            ..Self::default()
        }
    }

    /// The chosen content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Overwrite the content type.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = Some(content_type.into());
    }

    /// Set the content type only if none has been chosen yet.
    pub fn default_content_type(&mut self, content_type: &str) {
        if self.content_type.is_none() {
            self.content_type = Some(content_type.to_owned());
        }
    }

    /// The response body, if one was set.
    pub fn response_body(&self) -> Option<&str> {
        self.response_body.as_deref()
    }

    /// Overwrite the response body.
    pub fn set_response_body(&mut self, body: impl Into<String>) {
        self.response_body = Some(body.into());
    }

    /// The HTTP status, if one was set.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Overwrite the HTTP status.
    pub fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    /// The `Location` header value, if one was set.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Overwrite the `Location` header value.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    /// The view binding, if the pipeline supplied one.
    pub fn view(&self) -> Option<&Arc<dyn ViewContext>> {
        self.view.as_ref()
    }
}
