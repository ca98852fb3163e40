use rendition::{
    Options, RegisterAction, RenderContext, RendererRegistry, RendererSet, add_renderer,
    lookup_renderer, renderer_fn,
};
use std::sync::Arc;

#[test]
fn test_global_registry_has_builtins() {
    for name in rendition::renderers::BUILTINS {
        assert!(lookup_renderer(name).is_some(), "missing builtin {name}");
    }
}

#[test]
fn test_add_renderer_then_lookup_returns_same_function() {
    let action = add_renderer(
        "global_yaml",
        renderer_fn(|value, _options, ctx| {
            ctx.default_content_type("application/yaml");
            ctx.set_response_body(format!("--- {}", value.passthrough().unwrap_or_default()));
            Ok(())
        }),
    );
    assert_eq!(action, RegisterAction::Added);

    let first = lookup_renderer("global_yaml").unwrap();
    let again = lookup_renderer("global_yaml").unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert!(lookup_renderer("global_never_registered").is_none());
}

#[test]
fn test_baseline_component_on_global_registry_sees_add_ons() {
    let registry = RendererRegistry::global();
    let component = RendererSet::baseline(&registry);

    add_renderer(
        "global_text",
        renderer_fn(|value, _options, ctx| {
            ctx.default_content_type("text/plain");
            ctx.set_response_body(value.passthrough().unwrap_or_default());
            Ok(())
        }),
    );

    let rendered = component
        .dispatch(&Options::new().with("global_text", "hello"), &mut RenderContext::new())
        .unwrap()
        .into_rendered()
        .unwrap();
    assert_eq!(rendered.content_type.as_deref(), Some("text/plain"));
    assert_eq!(rendered.body, "hello");
}
