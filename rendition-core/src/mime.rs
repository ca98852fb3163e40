//! Content types produced by the built-in renderers.

/// `application/json`
pub const JSON: &str = "application/json";

/// `text/javascript`
pub const JS: &str = "text/javascript";

/// `application/xml`
pub const XML: &str = "application/xml";
