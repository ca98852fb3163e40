//! Dispatch outcomes.

use crate::context::RenderContext;

/// The content type and body a matched renderer produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Content type of the response, if any was chosen.
    pub content_type: Option<String>,
    /// Response body text.
    pub body: String,
}

impl Rendered {
    /// Read the result back out of a context after a renderer ran.
    pub fn from_context(ctx: &RenderContext) -> Self {
        Self {
            content_type: ctx.content_type().map(str::to_owned),
            body: ctx.response_body().unwrap_or_default().to_owned(),
        }
    }
}

/// The result of a dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// An enabled renderer matched and ran.
    Handled(Rendered),
    /// No enabled renderer's key was present; the caller should fall back
    /// to default rendering.
    Unhandled,
}

impl DispatchOutcome {
    /// Whether a renderer matched.
    pub fn is_handled(&self) -> bool {
        matches!(self, DispatchOutcome::Handled(_))
    }

    /// The rendered output, if handled.
    pub fn rendered(&self) -> Option<&Rendered> {
        match self {
            DispatchOutcome::Handled(rendered) => Some(rendered),
            DispatchOutcome::Unhandled => None,
        }
    }

    /// Consume the outcome, returning the rendered output if handled.
    pub fn into_rendered(self) -> Option<Rendered> {
        match self {
            DispatchOutcome::Handled(rendered) => Some(rendered),
            DispatchOutcome::Unhandled => None,
        }
    }
}
