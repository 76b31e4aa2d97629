//! Logging Setup
//!
//! Structured logging via the `tracing` crate. Library code only emits
//! events; hosts that want output call `init` once at startup.

use crate::error::ConfigurationError;
use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber with the given default level
///
/// `RUST_LOG` overrides the default when set. Fails if a global subscriber
/// is already installed.
pub fn init(default_level: &str) -> Result<(), ConfigurationError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| ConfigurationError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| ConfigurationError::Logging(err.to_string()))
}
