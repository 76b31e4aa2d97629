//! Integration tests for TOML manager definitions

use super::test_utils::weighted;
use tempfile::TempDir;
use viewlet::{AllowAll, ManagerDefinition, Registration, Scope, ViewletRegistry};

#[test]
fn test_definition_file_drives_region_rendering() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sidebar.toml");
    std::fs::write(
        &path,
        concat!(
            "provider_type = \"sidebar\"\n",
            "weight_ordered = true\n",
            "template = \"{% for v in viewlets %}<div>{{ v.body }}</div>{% endfor %}\"\n",
        ),
    )
    .unwrap();

    let definition = ManagerDefinition::from_toml_file(&path).unwrap();
    let ty = definition.build().unwrap();

    let registry = ViewletRegistry::new();
    registry
        .register(Registration::new(
            ty.provider_type().clone(),
            "nav",
            weighted("nav-out", 2),
        ))
        .unwrap();
    registry
        .register(Registration::new(
            ty.provider_type().clone(),
            "search",
            weighted("search-out", 1),
        ))
        .unwrap();

    let manager = ty.bind(Scope::unqualified(), &registry, &AllowAll);
    assert_eq!(
        manager.render().unwrap(),
        "<div>search-out</div><div>nav-out</div>"
    );
}

#[test]
fn test_definition_separator_override() {
    let definition = ManagerDefinition::from_toml_str(
        "provider_type = \"breadcrumbs\"\nseparator = \" / \"\n",
    )
    .unwrap();
    let ty = definition.build().unwrap();

    let registry = ViewletRegistry::new();
    registry
        .register(Registration::new(
            ty.provider_type().clone(),
            "home",
            weighted("Home", 0),
        ))
        .unwrap();
    registry
        .register(Registration::new(
            ty.provider_type().clone(),
            "page",
            weighted("Page", 0),
        ))
        .unwrap();

    // No weight support: name order, joined by the configured separator
    let manager = ty.bind(Scope::unqualified(), &registry, &AllowAll);
    assert_eq!(manager.render().unwrap(), "Home / Page");
}
