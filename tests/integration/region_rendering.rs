//! Integration tests for aggregate region rendering
//!
//! Tests cover:
//! - Weight ordering with stable ties
//! - Access filtering of unauthorized viewlets
//! - Render-failure propagation (no partial output)
//! - Template combine
//! - Idempotence over fixed registry state

use super::test_utils::{scenario_registry, weighted};
use std::sync::Arc;
use viewlet::{
    AllowAll, FnViewlet, GrantTable, ManagerType, ProviderType, Registration, RenderError, Scope,
    TeraTemplate, ViewletError, ViewletRegistry,
};

#[test]
fn test_weight_order_with_stable_ties() {
    let (registry, column) = scenario_registry();
    let ty = ManagerType::plain(column);
    let manager = ty.bind(Scope::unqualified(), &registry, &AllowAll);

    // B before C: equal weight, B registered first
    assert_eq!(manager.render().unwrap(), "b-out\nc-out\na-out");
}

#[test]
fn test_unauthorized_viewlet_omitted() {
    let (registry, column) = scenario_registry();
    let ty = ManagerType::plain(column);
    let policy = GrantTable::new("bob").grant_render("A").grant_render("C");
    let manager = ty.bind(Scope::unqualified(), &registry, &policy);

    let output = manager.render().unwrap();
    assert_eq!(output, "c-out\na-out");
    assert!(!output.contains("b-out"));
}

#[test]
fn test_deny_all_renders_empty() {
    let (registry, column) = scenario_registry();
    let ty = ManagerType::plain(column);
    let deny_all = GrantTable::new("nobody");
    let manager = ty.bind(Scope::unqualified(), &registry, &deny_all);

    assert_eq!(manager.render().unwrap(), "");
}

#[test]
fn test_empty_registry_renders_empty() {
    let registry = ViewletRegistry::new();
    let ty = ManagerType::plain(ProviderType::weight_ordered("column.left"));
    let manager = ty.bind(Scope::unqualified(), &registry, &AllowAll);

    assert_eq!(manager.render().unwrap(), "");
}

#[test]
fn test_render_failure_propagates_without_partial_output() {
    let (registry, column) = scenario_registry();
    registry
        .register(Registration::new(
            column.clone(),
            "broken",
            Arc::new(|_scope| {
                Box::new(FnViewlet::with_weight(
                    || Err(RenderError::message("backend down")),
                    7,
                ))
            }),
        ))
        .unwrap();

    let ty = ManagerType::plain(column);
    let manager = ty.bind(Scope::unqualified(), &registry, &AllowAll);

    let err = manager.render().unwrap_err();
    assert!(matches!(err, ViewletError::Render { ref name, .. } if name == "broken"));
}

#[test]
fn test_template_combine_in_sorted_order() {
    let (registry, column) = scenario_registry();
    let template =
        TeraTemplate::new("<ul>{% for v in viewlets %}<li>{{ v.body }}</li>{% endfor %}</ul>")
            .unwrap();
    let ty = ManagerType::builder(column)
        .template(Arc::new(template))
        .build()
        .unwrap();
    let manager = ty.bind(Scope::unqualified(), &registry, &AllowAll);

    assert_eq!(
        manager.render().unwrap(),
        "<ul><li>b-out</li><li>c-out</li><li>a-out</li></ul>"
    );
}

#[test]
fn test_template_receives_empty_list() {
    let registry = ViewletRegistry::new();
    let template =
        TeraTemplate::new("{% if viewlets %}full{% else %}<!-- empty -->{% endif %}").unwrap();
    let ty = ManagerType::builder(ProviderType::new("footer"))
        .template(Arc::new(template))
        .build()
        .unwrap();
    let manager = ty.bind(Scope::unqualified(), &registry, &AllowAll);

    assert_eq!(manager.render().unwrap(), "<!-- empty -->");
}

#[test]
fn test_render_is_idempotent() {
    let (registry, column) = scenario_registry();
    let ty = ManagerType::plain(column);
    let manager = ty.bind(Scope::unqualified(), &registry, &AllowAll);

    let first = manager.render().unwrap();
    let second = manager.render().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_scope_capabilities_select_registrations() {
    let registry = ViewletRegistry::new();
    let column = ProviderType::weight_ordered("column.left");

    registry
        .register(Registration::new(
            column.clone(),
            "everywhere",
            weighted("base-out", 1),
        ))
        .unwrap();
    registry
        .register(
            Registration::new(column.clone(), "admin-tools", weighted("admin-out", 2))
                .require_view(["admin"]),
        )
        .unwrap();

    let ty = ManagerType::plain(column);

    let public = ty.bind(Scope::unqualified(), &registry, &AllowAll);
    assert_eq!(public.render().unwrap(), "base-out");

    let admin_scope = Scope::new(
        Default::default(),
        Default::default(),
        ["admin"].into_iter().collect(),
    );
    let admin = ty.bind(admin_scope, &registry, &AllowAll);
    assert_eq!(admin.render().unwrap(), "base-out\nadmin-out");
}
