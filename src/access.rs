//! Access Filtering
//!
//! Authorization check applied before viewlets reach the sort and render
//! steps. The policy and principal are explicit arguments of the manager
//! binding; there is no ambient security context.

use crate::viewlet::{NamedViewlet, Viewlet};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Operation name checked for both aggregate render and single-name lookup
pub const RENDER_OPERATION: &str = "render";

/// Per-principal authorization check
pub trait AccessPolicy {
    /// True when the current principal may perform `operation` on the
    /// viewlet registered under `name`
    fn can_access(&self, name: &str, viewlet: &dyn Viewlet, operation: &str) -> bool;
}

/// Policy granting every operation to everyone
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn can_access(&self, _name: &str, _viewlet: &dyn Viewlet, _operation: &str) -> bool {
        true
    }
}

/// Explicit grant table for one principal; everything not granted is denied
#[derive(Debug, Clone, Default)]
pub struct GrantTable {
    principal: String,
    grants: HashMap<String, HashSet<String>>,
}

impl GrantTable {
    pub fn new(principal: impl Into<String>) -> Self {
        GrantTable {
            principal: principal.into(),
            grants: HashMap::new(),
        }
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Grant `operation` on the viewlet registered under `name`
    pub fn grant(mut self, name: impl Into<String>, operation: impl Into<String>) -> Self {
        self.grants
            .entry(name.into())
            .or_default()
            .insert(operation.into());
        self
    }

    /// Grant the render operation on `name`
    pub fn grant_render(self, name: impl Into<String>) -> Self {
        self.grant(name, RENDER_OPERATION)
    }
}

impl AccessPolicy for GrantTable {
    fn can_access(&self, name: &str, _viewlet: &dyn Viewlet, operation: &str) -> bool {
        self.grants
            .get(name)
            .map(|operations| operations.contains(operation))
            .unwrap_or(false)
    }
}

/// Stable filter: drop viewlets the principal may not render
///
/// An authorization failure here is a normal drop, never an error; relative
/// order of the survivors is preserved.
pub fn filter_authorized(policy: &dyn AccessPolicy, pairs: Vec<NamedViewlet>) -> Vec<NamedViewlet> {
    pairs
        .into_iter()
        .filter(|pair| {
            let allowed = policy.can_access(&pair.name, pair.viewlet.as_ref(), RENDER_OPERATION);
            if !allowed {
                trace!(name = %pair.name, "viewlet dropped by access filter");
            }
            allowed
        })
        .collect()
}
