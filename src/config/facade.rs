//! Config loader facade: assembles sources in precedence order.

use super::merge::builder_with_defaults;
use super::sources::{env_vars, global_file, workspace_file};
use super::AnagenConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`AnagenConfig`] from defaults, files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, `<workspace>/anagen.toml`,
    /// `ANAGEN_*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<AnagenConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = env_vars::add_to_builder(builder);

        let config: AnagenConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from an explicit file, replacing the file layers.
    pub fn load_from_file(path: &Path) -> Result<AnagenConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = env_vars::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Path of the user-level config file, if a home directory can be determined.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Built-in defaults without consulting any source.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> AnagenConfig {
        AnagenConfig::default()
    }
}
