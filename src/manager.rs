//! Viewlet Manager
//!
//! The aggregation point: for one (context, request, view) scope and one
//! provider type, look up all registered viewlets, drop the ones the current
//! principal may not access, sort the remainder, render each, and combine
//! the results. A `ManagerType` is the configured, reusable description of
//! one region; binding it to a scope yields the per-request manager.

use crate::access::{filter_authorized, AccessPolicy, RENDER_OPERATION};
use crate::error::{ConfigurationError, ViewletError};
use crate::order::{sort_viewlets, SortPolicy};
use crate::registry::ProviderLookup;
use crate::scope::Scope;
use crate::template::{RenderedViewlet, Template, TemplateBindings};
use crate::viewlet::{NamedViewlet, ProviderType, Viewlet};
use std::sync::Arc;
use tracing::{debug, trace};

/// Filter aspect of a manager type; the default applies the access policy
/// through [`filter_authorized`]
pub type FilterStrategy =
    Arc<dyn Fn(&dyn AccessPolicy, Vec<NamedViewlet>) -> Vec<NamedViewlet> + Send + Sync>;

/// A composable override for the filter and/or sort aspect of a manager type
///
/// A behavior supplying both aspects fully implements the manager contract
/// and must be the only one in a composition; the builder then adds no
/// defaults on top of it.
#[derive(Clone)]
pub struct Behavior {
    name: String,
    filter: Option<FilterStrategy>,
    sort: Option<SortPolicy>,
}

impl Behavior {
    pub fn new(name: impl Into<String>) -> Self {
        Behavior {
            name: name.into(),
            filter: None,
            sort: None,
        }
    }

    pub fn with_filter(mut self, filter: FilterStrategy) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortPolicy) -> Self {
        self.sort = Some(sort);
        self
    }

    fn is_complete(&self) -> bool {
        self.filter.is_some() && self.sort.is_some()
    }
}

/// Configured description of one region's manager
///
/// Built once at configuration time, then bound per request via
/// [`ManagerType::bind`].
pub struct ManagerType {
    provider_type: ProviderType,
    template: Option<Arc<dyn Template + Send + Sync>>,
    filter: FilterStrategy,
    sort: SortPolicy,
    separator: String,
}

impl ManagerType {
    pub fn builder(provider_type: ProviderType) -> ManagerTypeBuilder {
        ManagerTypeBuilder {
            provider_type,
            template: None,
            behaviors: Vec::new(),
            separator: None,
        }
    }

    /// A manager type with the defaults for its provider type and no template
    pub fn plain(provider_type: ProviderType) -> Self {
        // Builder with no behaviors cannot fail
        match ManagerType::builder(provider_type).build() {
            Ok(ty) => ty,
            Err(_) => unreachable!("default composition is always valid"),
        }
    }

    pub fn provider_type(&self) -> &ProviderType {
        &self.provider_type
    }

    pub fn sort_policy(&self) -> &SortPolicy {
        &self.sort
    }

    /// Bind this manager type to one (context, request, view) scope for one
    /// render pass
    pub fn bind<'a>(
        &'a self,
        scope: Scope,
        registry: &'a dyn ProviderLookup,
        access: &'a dyn AccessPolicy,
    ) -> ViewletManager<'a> {
        ViewletManager {
            ty: self,
            scope,
            registry,
            access,
        }
    }
}

/// Builder validating the composition of a manager type
pub struct ManagerTypeBuilder {
    provider_type: ProviderType,
    template: Option<Arc<dyn Template + Send + Sync>>,
    behaviors: Vec<Behavior>,
    separator: Option<String>,
}

impl ManagerTypeBuilder {
    pub fn template(mut self, template: Arc<dyn Template + Send + Sync>) -> Self {
        self.template = Some(template);
        self
    }

    /// Separator for the no-template combine step; defaults to `"\n"`
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Validate the composition and produce the manager type
    ///
    /// Rejected compositions: a complete behavior combined with any other
    /// behavior, and two behaviors supplying the same aspect. Aspects no
    /// behavior supplies fall back to the defaults (authorization filter;
    /// sort policy derived from the provider type's ordering contract).
    pub fn build(self) -> Result<ManagerType, ConfigurationError> {
        if let Some(complete) = self.behaviors.iter().find(|b| b.is_complete()) {
            if self.behaviors.len() > 1 {
                return Err(ConfigurationError::ConflictingBehavior(format!(
                    "behavior `{}` fully implements the manager contract and cannot be \
                     composed with others",
                    complete.name
                )));
            }
        }

        let mut filter: Option<(&str, FilterStrategy)> = None;
        let mut sort: Option<(&str, SortPolicy)> = None;
        for behavior in &self.behaviors {
            if let Some(f) = &behavior.filter {
                if let Some((earlier, _)) = &filter {
                    return Err(ConfigurationError::ConflictingBehavior(format!(
                        "behaviors `{earlier}` and `{}` both supply the filter aspect",
                        behavior.name
                    )));
                }
                filter = Some((&behavior.name, f.clone()));
            }
            if let Some(s) = &behavior.sort {
                if let Some((earlier, _)) = &sort {
                    return Err(ConfigurationError::ConflictingBehavior(format!(
                        "behaviors `{earlier}` and `{}` both supply the sort aspect",
                        behavior.name
                    )));
                }
                sort = Some((&behavior.name, s.clone()));
            }
        }

        let default_sort = if self.provider_type.is_weight_ordered() {
            SortPolicy::Weight
        } else {
            SortPolicy::Name
        };

        Ok(ManagerType {
            provider_type: self.provider_type,
            template: self.template,
            filter: filter
                .map(|(_, f)| f)
                .unwrap_or_else(|| Arc::new(|policy, pairs| filter_authorized(policy, pairs))),
            sort: sort.map(|(_, s)| s).unwrap_or(default_sort),
            separator: self.separator.unwrap_or_else(|| "\n".to_string()),
        })
    }
}

/// A manager type bound to one scope for one render pass
///
/// Holds no mutable state and caches nothing: every [`render`] call
/// re-queries the registry, so registry mutations between calls are
/// observed, and two calls over fixed registry state yield identical output.
///
/// [`render`]: ViewletManager::render
pub struct ViewletManager<'a> {
    ty: &'a ManagerType,
    scope: Scope,
    registry: &'a dyn ProviderLookup,
    access: &'a dyn AccessPolicy,
}

impl<'a> ViewletManager<'a> {
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Aggregate render: lookup, filter, sort, render each, combine
    pub fn render(&self) -> Result<String, ViewletError> {
        // Step 1: Find all viewlets of this provider type for the scope
        let pairs = self
            .registry
            .lookup_all(&self.scope, &self.ty.provider_type);
        let looked_up = pairs.len();

        // Step 2: Drop viewlets the current principal may not access
        let mut pairs = (self.ty.filter)(self.access, pairs);
        debug!(
            provider_type = %self.ty.provider_type,
            looked_up,
            authorized = pairs.len(),
            "viewlet lookup complete"
        );

        // Step 3: Apply the configured sort policy
        sort_viewlets(&self.ty.sort, &mut pairs);

        // Step 4: Render each viewlet; a single failure aborts the whole
        // aggregate rather than producing partial output
        let mut rendered = Vec::with_capacity(pairs.len());
        for pair in &pairs {
            trace!(name = %pair.name, "rendering viewlet");
            let body = pair
                .viewlet
                .render()
                .map_err(|source| ViewletError::Render {
                    name: pair.name.clone(),
                    source,
                })?;
            rendered.push(RenderedViewlet {
                name: pair.name.clone(),
                body,
            });
        }

        // Step 5: Combine through the template, or join with the separator
        match &self.ty.template {
            Some(template) => template
                .render(&TemplateBindings::new(rendered))
                .map_err(ViewletError::Template),
            None => Ok(rendered
                .iter()
                .map(|entry| entry.body.as_str())
                .collect::<Vec<_>>()
                .join(&self.ty.separator)),
        }
    }

    /// Look up a single named viewlet
    ///
    /// The two failure kinds stay distinct: `NotFound` when no registration
    /// matches, `NotAuthorized` when one matches but the access check fails.
    pub fn lookup_one(&self, name: &str) -> Result<Box<dyn Viewlet>, ViewletError> {
        let viewlet = self
            .registry
            .lookup_named(&self.scope, &self.ty.provider_type, name)
            .ok_or_else(|| ViewletError::NotFound(name.to_string()))?;

        if !self
            .access
            .can_access(name, viewlet.as_ref(), RENDER_OPERATION)
        {
            return Err(ViewletError::NotAuthorized(name.to_string()));
        }

        Ok(viewlet)
    }

    /// Like [`lookup_one`], but both failure kinds collapse into the default
    ///
    /// [`lookup_one`]: ViewletManager::lookup_one
    pub fn lookup_one_or(&self, name: &str, default: Box<dyn Viewlet>) -> Box<dyn Viewlet> {
        self.lookup_one(name).unwrap_or(default)
    }
}
