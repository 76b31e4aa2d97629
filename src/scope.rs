//! Lookup Scope
//!
//! The (context, request, view) triple a viewlet manager is bound to. Each
//! slot carries an explicit capability set; registrations declare required
//! capabilities per slot and match when the scope provides all of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of capability tags provided by one scope slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet(BTreeSet<String>);

impl CapabilitySet {
    pub fn empty() -> Self {
        CapabilitySet(BTreeSet::new())
    }

    pub fn contains(&self, capability: &str) -> bool {
        self.0.contains(capability)
    }

    /// Number of capabilities in the set (registration specificity weight)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every capability in `required` is provided by this set
    pub fn satisfies(&self, required: &CapabilitySet) -> bool {
        required.0.iter().all(|c| self.0.contains(c))
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CapabilitySet(iter.into_iter().map(Into::into).collect())
    }
}

/// The (context, request, view) triple for one render pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub context: CapabilitySet,
    pub request: CapabilitySet,
    pub view: CapabilitySet,
}

impl Scope {
    pub fn new(context: CapabilitySet, request: CapabilitySet, view: CapabilitySet) -> Self {
        Scope {
            context,
            request,
            view,
        }
    }

    /// A scope with no capabilities on any slot; matches only registrations
    /// that require nothing
    pub fn unqualified() -> Self {
        Scope::default()
    }

    /// True when every slot satisfies the corresponding required set
    pub fn satisfies(&self, required: &Scope) -> bool {
        self.context.satisfies(&required.context)
            && self.request.satisfies(&required.request)
            && self.view.satisfies(&required.view)
    }
}
