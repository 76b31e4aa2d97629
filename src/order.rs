//! Sort Policy
//!
//! Orders the access-filtered viewlets before rendering. Exactly one policy
//! applies per manager type, selected once at configuration time. All sorts
//! are stable, so equal keys retain the registry's iteration order.

use crate::viewlet::NamedViewlet;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Manager-supplied comparison for the custom policy
pub type Comparator = Arc<dyn Fn(&NamedViewlet, &NamedViewlet) -> Ordering + Send + Sync>;

/// Ordering policy for the viewlets of one manager type
#[derive(Clone)]
pub enum SortPolicy {
    /// Stable sort by `weight()` ascending; the default when the provider
    /// type declares weight support
    Weight,
    /// Stable sort by registered name ascending; the deterministic default
    /// when no weight support is declared
    Name,
    /// Caller-supplied total order
    Custom(Comparator),
}

impl fmt::Debug for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortPolicy::Weight => f.write_str("Weight"),
            SortPolicy::Name => f.write_str("Name"),
            SortPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Apply the policy in place; `sort_by` is stable
pub fn sort_viewlets(policy: &SortPolicy, pairs: &mut [NamedViewlet]) {
    match policy {
        SortPolicy::Weight => {
            pairs.sort_by(|a, b| a.viewlet.weight().cmp(&b.viewlet.weight()));
        }
        SortPolicy::Name => {
            pairs.sort_by(|a, b| a.name.cmp(&b.name));
        }
        SortPolicy::Custom(compare) => {
            pairs.sort_by(|a, b| compare(a, b));
        }
    }
}
