//! Submission settings baked into a generated framework (`submit.toml`).

use super::job::JobFormat;
use super::SubmitConfig;
use crate::error::ToolError;
use crate::fsutil;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUBMIT_SETTINGS_FILE: &str = "submit.toml";
pub const SUBMIT_SCRIPT_FILE: &str = "submit_condor.sh";

/// Values fixed at scaffold time and read back by `anagen submit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitSettings {
    /// Analysis executable inside the framework directory
    pub executable: String,
    pub job_format: JobFormat,
    /// Remote storage root; each job uploads to `<remote_root>/<label>`
    pub remote_root: String,
    pub env_setup: String,
    pub runtime_setup: String,
    pub storage_endpoint: String,
    pub upload_program: String,
    pub job_flavour: String,
    pub submit_program: String,
}

impl SubmitSettings {
    pub fn from_config(
        config: &SubmitConfig,
        executable: &str,
        job_format: JobFormat,
    ) -> Result<Self, ToolError> {
        let remote_root = match &config.remote_root {
            Some(root) => root.clone(),
            None => {
                let user = detect_user().ok_or_else(|| {
                    ToolError::ConfigError(
                        "cannot detect user name; set submit.remote_root".to_string(),
                    )
                })?;
                default_remote_root(&user)
            }
        };

        Ok(Self {
            executable: executable.to_string(),
            job_format,
            remote_root,
            env_setup: config.env_setup.clone(),
            runtime_setup: config.runtime_setup.clone(),
            storage_endpoint: config.storage_endpoint.clone(),
            upload_program: config.upload_program.clone(),
            job_flavour: config.job_flavour.clone(),
            submit_program: config.submit_program.clone(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ToolError> {
        let text = fsutil::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), ToolError> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| ToolError::ConfigError(format!("Failed to serialize settings: {}", e)))?;
        let header = "# Generated by anagen scaffold; read by `anagen submit`.\n";
        fsutil::write(path, format!("{}{}", header, text))?;
        Ok(())
    }
}

/// Login name from the environment.
pub fn detect_user() -> Option<String> {
    ["USER", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.trim().is_empty())
}

/// CERNBox layout: `/eos/user/<initial>/<user>/AnalyzerOutput`.
pub fn default_remote_root(user: &str) -> String {
    let initial = user.chars().next().map(String::from).unwrap_or_default();
    format!("/eos/user/{}/{}/AnalyzerOutput", initial, user)
}

/// Shell shim placed in the framework that forwards to `anagen submit`.
pub fn render_submit_script(framework_dir: &Path) -> String {
    format!(
        "#!/bin/bash\n\
         # Usage: ./{script} <config.txt> [--dry-run]\n\
         # Set ANAGEN_BIN to use an anagen binary that is not on PATH.\n\
         exec \"${{ANAGEN_BIN:-anagen}}\" submit --framework \"{dir}\" \"$@\"\n",
        script = SUBMIT_SCRIPT_FILE,
        dir = framework_dir.display(),
    )
}
