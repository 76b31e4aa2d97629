//! Manager Definitions
//!
//! Serde-backed description of a manager type, loadable from TOML. This is
//! plain data binding for hosts that configure regions from files; the
//! builder API in `manager` remains the programmatic surface.

use crate::error::ConfigurationError;
use crate::manager::ManagerType;
use crate::template::TeraTemplate;
use crate::viewlet::ProviderType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Declarative description of one region's manager type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerDefinition {
    /// Provider type name identifying the viewlet family for this region
    pub provider_type: String,

    /// Whether the provider type declares weight support
    #[serde(default)]
    pub weight_ordered: bool,

    /// Inline template source for the combine step
    #[serde(default)]
    pub template: Option<String>,

    /// Path to a template file; mutually exclusive with `template`
    #[serde(default)]
    pub template_file: Option<PathBuf>,

    /// Separator for the no-template combine step
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    "\n".to_string()
}

impl ManagerDefinition {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigurationError> {
        let source = std::fs::read_to_string(path)?;
        ManagerDefinition::from_toml_str(&source)
    }

    /// The provider type this definition describes
    pub fn provider_type(&self) -> ProviderType {
        if self.weight_ordered {
            ProviderType::weight_ordered(self.provider_type.clone())
        } else {
            ProviderType::new(self.provider_type.clone())
        }
    }

    /// Compile the definition into a manager type
    ///
    /// Template compilation failures surface here, at configuration time.
    pub fn build(&self) -> Result<ManagerType, ConfigurationError> {
        if self.template.is_some() && self.template_file.is_some() {
            return Err(ConfigurationError::InvalidDefinition(format!(
                "`{}`: `template` and `template_file` are mutually exclusive",
                self.provider_type
            )));
        }

        let mut builder =
            ManagerType::builder(self.provider_type()).separator(self.separator.clone());
        if let Some(source) = &self.template {
            builder = builder.template(Arc::new(TeraTemplate::new(source)?));
        }
        if let Some(path) = &self.template_file {
            builder = builder.template(Arc::new(TeraTemplate::from_file(path)?));
        }
        builder.build()
    }
}
