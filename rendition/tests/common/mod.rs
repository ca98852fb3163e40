#![allow(dead_code)]

use rendition::{BoxError, RendererRegistry, RendererSet, Serializable, ViewContext};
use serde::Serialize;
use std::sync::Arc;

// ============================================================================
// Test Values
// ============================================================================

/// A record that knows its own JSON and XML forms.
#[derive(Debug, Serialize)]
pub struct Invoice {
    pub id: u32,
    pub total: u32,
}

impl Serializable for Invoice {
    fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    fn to_xml(&self) -> Option<String> {
        Some(format!(
            "<invoice><id>{}</id><total>{}</total></invoice>",
            self.id, self.total
        ))
    }
}

/// A value that only knows its script form.
#[derive(Debug)]
pub struct Widget;

impl Serializable for Widget {
    fn to_js(&self) -> Option<String> {
        Some("new Widget();".into())
    }
}

// ============================================================================
// Test View
// ============================================================================

#[derive(Debug)]
pub struct PartialView;

impl ViewContext for PartialView {
    fn render(&self, template: &str) -> Result<String, BoxError> {
        match template {
            "items/list" => Ok("<li>one</li>".into()),
            other => Err(format!("missing template {other}").into()),
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .try_init();
}

pub fn registry() -> Arc<RendererRegistry> {
    Arc::new(RendererRegistry::with_builtins())
}

pub fn names(set: &RendererSet) -> Vec<String> {
    set.enabled_names().iter().map(|n| n.to_string()).collect()
}

pub fn view() -> Arc<dyn ViewContext> {
    Arc::new(PartialView)
}
