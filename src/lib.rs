//! Viewlet: pluggable view fragments aggregated per region
//!
//! Viewlets are named content fragments registered for a (context, request,
//! view) scope under a provider type. A [`ViewletManager`] discovers every
//! registered viewlet of its provider type, drops the ones the current
//! principal may not access, orders the rest by the configured policy, and
//! combines the rendered output through a template or a plain join.

pub mod access;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod order;
pub mod registry;
pub mod scope;
pub mod template;
pub mod viewlet;

pub use access::{AccessPolicy, AllowAll, GrantTable};
pub use config::ManagerDefinition;
pub use error::{ConfigurationError, RenderError, ViewletError};
pub use manager::{Behavior, ManagerType, ManagerTypeBuilder, ViewletManager};
pub use order::SortPolicy;
pub use registry::{ProviderLookup, Registration, ViewletFactory, ViewletRegistry};
pub use scope::{CapabilitySet, Scope};
pub use template::{RenderedViewlet, Template, TemplateBindings, TeraTemplate};
pub use viewlet::{FnViewlet, NamedViewlet, ProviderType, StaticViewlet, Viewlet};
