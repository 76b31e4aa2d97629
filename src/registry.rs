//! Viewlet Registry
//!
//! Typed registration table mapping (provider type, name, required scope
//! capabilities) to viewlet factories. Lookup resolves the most specific
//! matching registration per name with deterministic tie-breaking, so two
//! lookups over the same table always yield the same result set in the same
//! order.

use crate::error::ConfigurationError;
use crate::scope::Scope;
use crate::viewlet::{NamedViewlet, ProviderType, Viewlet};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Factory producing a fresh viewlet instance for one render pass
pub type ViewletFactory = Arc<dyn Fn(&Scope) -> Box<dyn Viewlet> + Send + Sync>;

/// One entry in the registration table
#[derive(Clone)]
pub struct Registration {
    provider_type: ProviderType,
    name: String,
    requires: Scope,
    factory: ViewletFactory,
}

impl Registration {
    pub fn new(
        provider_type: ProviderType,
        name: impl Into<String>,
        factory: ViewletFactory,
    ) -> Self {
        Registration {
            provider_type,
            name: name.into(),
            requires: Scope::default(),
            factory,
        }
    }

    /// Require capabilities on the context slot for this registration to match
    pub fn require_context<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.context = capabilities.into_iter().collect();
        self
    }

    /// Require capabilities on the request slot
    pub fn require_request<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.request = capabilities.into_iter().collect();
        self
    }

    /// Require capabilities on the view slot
    pub fn require_view<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.view = capabilities.into_iter().collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total number of required capabilities across all slots; higher wins
    /// when several registrations for the same name match a scope
    fn specificity(&self) -> usize {
        self.requires.context.len() + self.requires.request.len() + self.requires.view.len()
    }
}

/// Lookup seam consumed by viewlet managers
///
/// `ViewletRegistry` is the in-crate implementation; hosts with their own
/// component system can implement this trait instead.
pub trait ProviderLookup {
    /// All viewlets of `provider_type` whose registrations match `scope`,
    /// one per name, in registration order of the winning entries
    fn lookup_all(&self, scope: &Scope, provider_type: &ProviderType) -> Vec<NamedViewlet>;

    /// Single-name lookup through the same resolution
    fn lookup_named(
        &self,
        scope: &Scope,
        provider_type: &ProviderType,
        name: &str,
    ) -> Option<Box<dyn Viewlet>>;
}

/// In-memory registration table
///
/// Registration happens through `&self` behind an RwLock; the expected
/// pattern is registration at startup and read-only lookup during render
/// passes.
#[derive(Default)]
pub struct ViewletRegistry {
    entries: RwLock<Vec<Registration>>,
}

impl ViewletRegistry {
    pub fn new() -> Self {
        ViewletRegistry::default()
    }

    /// Add a registration, rejecting exact duplicates
    ///
    /// Two registrations for the same (provider type, name) are allowed when
    /// their requirements differ (a more specific override); identical
    /// requirements are a configuration error.
    pub fn register(&self, registration: Registration) -> Result<(), ConfigurationError> {
        let mut entries = self.entries.write();

        let duplicate = entries.iter().any(|existing| {
            existing.provider_type == registration.provider_type
                && existing.name == registration.name
                && existing.requires == registration.requires
        });
        if duplicate {
            return Err(ConfigurationError::DuplicateRegistration {
                provider_type: registration.provider_type.name().to_string(),
                name: registration.name,
            });
        }

        debug!(
            provider_type = %registration.provider_type,
            name = %registration.name,
            "registered viewlet"
        );
        entries.push(registration);
        Ok(())
    }

    /// Resolve the winning registration index per name for the given scope
    ///
    /// Returns indices in registration order. Most specific match wins per
    /// name; on equal specificity the earliest registration wins.
    fn resolve(&self, scope: &Scope, provider_type: &ProviderType) -> Vec<usize> {
        let entries = self.entries.read();

        // Winner per name: (index, specificity), first-seen order preserved
        let mut winners: Vec<(usize, usize)> = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            if entry.provider_type != *provider_type || !scope.satisfies(&entry.requires) {
                continue;
            }
            let specificity = entry.specificity();
            match winners
                .iter_mut()
                .find(|(winner, _)| entries[*winner].name == entry.name)
            {
                Some(slot) if specificity > slot.1 => *slot = (index, specificity),
                Some(_) => {}
                None => winners.push((index, specificity)),
            }
        }

        winners.into_iter().map(|(index, _)| index).collect()
    }
}

impl ProviderLookup for ViewletRegistry {
    fn lookup_all(&self, scope: &Scope, provider_type: &ProviderType) -> Vec<NamedViewlet> {
        let indices = self.resolve(scope, provider_type);
        let entries = self.entries.read();

        indices
            .into_iter()
            .map(|index| {
                let entry = &entries[index];
                NamedViewlet {
                    name: entry.name.clone(),
                    viewlet: (entry.factory)(scope),
                }
            })
            .collect()
    }

    fn lookup_named(
        &self,
        scope: &Scope,
        provider_type: &ProviderType,
        name: &str,
    ) -> Option<Box<dyn Viewlet>> {
        let indices = self.resolve(scope, provider_type);
        let entries = self.entries.read();

        indices
            .into_iter()
            .map(|index| &entries[index])
            .find(|entry| entry.name == name)
            .map(|entry| (entry.factory)(scope))
    }
}
