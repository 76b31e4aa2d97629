//! Error types for viewlet lookup, rendering, and configuration.

use thiserror::Error;

/// Failure raised while rendering a single viewlet or a template
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render failed: {0}")]
    Message(String),

    #[error("Template error: {0}")]
    Template(String),
}

impl RenderError {
    /// Convenience constructor for viewlet implementations
    pub fn message(msg: impl Into<String>) -> Self {
        RenderError::Message(msg.into())
    }
}

/// Render-time errors surfaced by a viewlet manager
#[derive(Debug, Error)]
pub enum ViewletError {
    #[error("No viewlet named `{0}` found for this scope")]
    NotFound(String),

    #[error("Not authorized to access the viewlet named `{0}`")]
    NotAuthorized(String),

    #[error("Rendering viewlet `{name}` failed")]
    Render {
        name: String,
        #[source]
        source: RenderError,
    },

    #[error("Combining rendered viewlets through the template failed")]
    Template(#[source] RenderError),
}

/// Construction-time errors: registration and manager-type composition
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Duplicate registration: provider type `{provider_type}`, name `{name}`")]
    DuplicateRegistration { provider_type: String, name: String },

    #[error("Conflicting manager-type composition: {0}")]
    ConflictingBehavior(String),

    #[error("Template compilation failed: {0}")]
    TemplateCompile(String),

    #[error("Invalid manager definition: {0}")]
    InvalidDefinition(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Definition I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<toml::de::Error> for ConfigurationError {
    fn from(err: toml::de::Error) -> Self {
        ConfigurationError::InvalidDefinition(err.to_string())
    }
}
