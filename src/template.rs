//! Template Combine Step
//!
//! When a manager type carries a template, the rendered viewlets are combined
//! through it instead of plain newline joining. Templates always receive
//! pre-rendered (name, body) entries under the fixed binding name `viewlets`;
//! they never invoke viewlets themselves, so render failures are surfaced by
//! the render step before the template runs.

use crate::error::{ConfigurationError, RenderError};
use serde::Serialize;
use std::collections::BTreeMap;
use tera::{Context as TeraContext, Tera};

/// Fixed name the ordered viewlet entries are bound under
pub const VIEWLETS_BINDING: &str = "viewlets";

/// One rendered viewlet as seen by a template
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenderedViewlet {
    pub name: String,
    pub body: String,
}

/// Named-parameter binding passed to a template
#[derive(Debug, Clone, Default)]
pub struct TemplateBindings {
    entries: Vec<RenderedViewlet>,
    extra: BTreeMap<String, String>,
}

impl TemplateBindings {
    pub fn new(entries: Vec<RenderedViewlet>) -> Self {
        TemplateBindings {
            entries,
            extra: BTreeMap::new(),
        }
    }

    /// Ordered entries bound under [`VIEWLETS_BINDING`]
    pub fn entries(&self) -> &[RenderedViewlet] {
        &self.entries
    }

    /// Additional string binding available to the template
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}

/// Template-rendering seam consumed by the manager's combine step
pub trait Template {
    fn render(&self, bindings: &TemplateBindings) -> Result<String, RenderError>;
}

/// One-shot Tera template compiled at configuration time
///
/// Entries appear to the template as an array of `{ name, body }` objects:
/// `{% for v in viewlets %}{{ v.body }}{% endfor %}`.
pub struct TeraTemplate {
    engine: Tera,
}

const TEMPLATE_NAME: &str = "manager";

impl TeraTemplate {
    /// Compile a template from inline source; failures are configuration
    /// errors, not render errors
    pub fn new(source: &str) -> Result<Self, ConfigurationError> {
        let mut engine = Tera::default();
        engine
            .add_raw_template(TEMPLATE_NAME, source)
            .map_err(|err| ConfigurationError::TemplateCompile(err.to_string()))?;
        Ok(TeraTemplate { engine })
    }

    /// Compile a template from a file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigurationError> {
        let source = std::fs::read_to_string(path)?;
        TeraTemplate::new(&source)
    }
}

impl Template for TeraTemplate {
    fn render(&self, bindings: &TemplateBindings) -> Result<String, RenderError> {
        let mut context = TeraContext::new();
        context.insert(VIEWLETS_BINDING, bindings.entries());
        for (name, value) in bindings.extra() {
            context.insert(name.as_str(), value);
        }

        self.engine
            .render(TEMPLATE_NAME, &context)
            .map_err(|err| RenderError::Template(err.to_string()))
    }
}
