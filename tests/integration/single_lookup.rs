//! Integration tests for single-name viewlet lookup
//!
//! Tests cover:
//! - NotFound vs NotAuthorized staying distinct in `lookup_one`
//! - Both failure kinds collapsing to the default in `lookup_one_or`

use super::test_utils::scenario_registry;
use viewlet::{GrantTable, ManagerType, Scope, StaticViewlet, Viewlet, ViewletError};

#[test]
fn test_lookup_one_found_and_authorized() {
    let (registry, column) = scenario_registry();
    let ty = ManagerType::plain(column);
    let policy = GrantTable::new("alice").grant_render("A");
    let manager = ty.bind(Scope::unqualified(), &registry, &policy);

    let viewlet = manager.lookup_one("A").unwrap();
    assert_eq!(viewlet.render().unwrap(), "a-out");
    assert_eq!(viewlet.weight(), 10);
}

#[test]
fn test_lookup_one_not_found() {
    let (registry, column) = scenario_registry();
    let ty = ManagerType::plain(column);
    let policy = GrantTable::new("alice").grant_render("A");
    let manager = ty.bind(Scope::unqualified(), &registry, &policy);

    assert!(matches!(
        manager.lookup_one("missing"),
        Err(ViewletError::NotFound(name)) if name == "missing"
    ));
}

#[test]
fn test_lookup_one_not_authorized_is_distinct() {
    let (registry, column) = scenario_registry();
    let ty = ManagerType::plain(column);
    let policy = GrantTable::new("alice").grant_render("A");
    let manager = ty.bind(Scope::unqualified(), &registry, &policy);

    // B exists but alice holds no render grant for it
    assert!(matches!(
        manager.lookup_one("B"),
        Err(ViewletError::NotAuthorized(name)) if name == "B"
    ));
}

#[test]
fn test_lookup_one_or_returns_default_for_missing() {
    let (registry, column) = scenario_registry();
    let ty = ManagerType::plain(column);
    let policy = GrantTable::new("alice").grant_render("A");
    let manager = ty.bind(Scope::unqualified(), &registry, &policy);

    let default: Box<dyn Viewlet> = Box::new(StaticViewlet::new("default-out"));
    let viewlet = manager.lookup_one_or("missing", default);
    assert_eq!(viewlet.render().unwrap(), "default-out");
}

#[test]
fn test_lookup_one_or_returns_default_for_forbidden() {
    let (registry, column) = scenario_registry();
    let ty = ManagerType::plain(column);
    let policy = GrantTable::new("alice").grant_render("A");
    let manager = ty.bind(Scope::unqualified(), &registry, &policy);

    let default: Box<dyn Viewlet> = Box::new(StaticViewlet::new("default-out"));
    let viewlet = manager.lookup_one_or("B", default);
    assert_eq!(viewlet.render().unwrap(), "default-out");
}
