//! Configuration System
//!
//! Layered configuration for the resolver, scaffold generator and batch submitter.
//! Defaults are overridden by the global config file, the workspace `anagen.toml`,
//! and finally `ANAGEN_*` environment variables. Tests included.

use serde::{Deserialize, Serialize};

pub use crate::batch::SubmitConfig;
pub use crate::logging::LoggingConfig;
pub use crate::resolver::ResolverConfig;
pub use crate::scaffold::ScaffoldConfig;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::workspace_file::{workspace_config_path, WORKSPACE_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnagenConfig {
    /// Dataset resolver settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Scaffold generator settings
    #[serde(default)]
    pub scaffold: ScaffoldConfig,

    /// Batch submission defaults baked into generated frameworks
    #[serde(default)]
    pub submit: SubmitConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Resolver(String),
    Scaffold(String),
    Submit(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Resolver(msg) => write!(f, "resolver: {}", msg),
            ValidationError::Scaffold(msg) => write!(f, "scaffold: {}", msg),
            ValidationError::Submit(msg) => write!(f, "submit: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl AnagenConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.resolver.validate() {
            errors.push(ValidationError::Resolver(e));
        }
        if let Err(e) = self.scaffold.validate() {
            errors.push(ValidationError::Scaffold(e));
        }
        if let Err(e) = self.submit.validate() {
            errors.push(ValidationError::Submit(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
