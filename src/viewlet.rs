//! Viewlet Abstraction
//!
//! A viewlet is a named, independently rendered content fragment contributed
//! to one region of a larger view. Viewlets are constructed per render pass by
//! the registry and owned by the manager for the duration of one call; they
//! are never cached across passes.

use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A renderable content fragment
///
/// The name a viewlet is known by is the name it was registered under; the
/// registry guarantees uniqueness per (provider type, name).
pub trait Viewlet {
    /// Sort key when the provider type is weight-ordered; lower renders first
    fn weight(&self) -> i64 {
        0
    }

    /// Produce this viewlet's markup. A failure here aborts the whole
    /// aggregate render, it is never swallowed.
    fn render(&self) -> Result<String, RenderError>;
}

/// A (registered name, viewlet) pair as returned by registry lookup
pub struct NamedViewlet {
    pub name: String,
    pub viewlet: Box<dyn Viewlet>,
}

impl fmt::Debug for NamedViewlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedViewlet")
            .field("name", &self.name)
            .field("weight", &self.viewlet.weight())
            .finish()
    }
}

/// Capability tag identifying a family of viewlets sharing one registry
/// namespace, plus its declared ordering contract
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderType {
    name: String,
    weight_ordered: bool,
}

impl ProviderType {
    /// A provider type without weight support; managers default to
    /// name-ascending ordering
    pub fn new(name: impl Into<String>) -> Self {
        ProviderType {
            name: name.into(),
            weight_ordered: false,
        }
    }

    /// A provider type declaring weight support; managers default to stable
    /// weight-ascending ordering
    pub fn weight_ordered(name: impl Into<String>) -> Self {
        ProviderType {
            name: name.into(),
            weight_ordered: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_weight_ordered(&self) -> bool {
        self.weight_ordered
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Fixed-content viewlet: a name-independent body with an optional weight
#[derive(Debug, Clone)]
pub struct StaticViewlet {
    weight: i64,
    body: String,
}

impl StaticViewlet {
    pub fn new(body: impl Into<String>) -> Self {
        StaticViewlet {
            weight: 0,
            body: body.into(),
        }
    }

    pub fn with_weight(body: impl Into<String>, weight: i64) -> Self {
        StaticViewlet {
            weight,
            body: body.into(),
        }
    }
}

impl Viewlet for StaticViewlet {
    fn weight(&self) -> i64 {
        self.weight
    }

    fn render(&self) -> Result<String, RenderError> {
        Ok(self.body.clone())
    }
}

/// Closure-backed viewlet; the registration factory captures whatever scope
/// data the closure needs
pub struct FnViewlet<F>
where
    F: Fn() -> Result<String, RenderError>,
{
    weight: i64,
    render: F,
}

impl<F> FnViewlet<F>
where
    F: Fn() -> Result<String, RenderError>,
{
    pub fn new(render: F) -> Self {
        FnViewlet { weight: 0, render }
    }

    pub fn with_weight(render: F, weight: i64) -> Self {
        FnViewlet { weight, render }
    }
}

impl<F> Viewlet for FnViewlet<F>
where
    F: Fn() -> Result<String, RenderError>,
{
    fn weight(&self) -> i64 {
        self.weight
    }

    fn render(&self) -> Result<String, RenderError> {
        (self.render)()
    }
}
