//! Catalog query backends.

use crate::error::ToolError;
use std::process::Command;
use tracing::{debug, warn};

/// Source of logical file names for a dataset
pub trait CatalogQuery {
    /// Run the query and return its raw textual output.
    fn query(&self, dataset: &str) -> Result<String, ToolError>;

    /// Human-readable form of the query, for logs.
    fn describe(&self, dataset: &str) -> String {
        format!("file dataset={}", dataset)
    }
}

/// CMS Data Aggregation System client (`dasgoclient`)
#[derive(Debug, Clone)]
pub struct DasClient {
    program: String,
}

impl DasClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn arguments(dataset: &str) -> [String; 2] {
        // limit=0 returns the full result set
        [
            format!("--query=file dataset={}", dataset),
            "--limit=0".to_string(),
        ]
    }
}

impl Default for DasClient {
    fn default() -> Self {
        Self::new("dasgoclient")
    }
}

impl CatalogQuery for DasClient {
    fn query(&self, dataset: &str) -> Result<String, ToolError> {
        let output = Command::new(&self.program)
            .args(Self::arguments(dataset))
            .output()
            .map_err(|e| ToolError::QueryFailed(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            warn!(
                program = %self.program,
                status = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Catalog query exited with failure"
            );
        }
        debug!(bytes = output.stdout.len(), "Catalog query output received");

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn describe(&self, dataset: &str) -> String {
        let [query, limit] = Self::arguments(dataset);
        format!("{} \"{}\" {}", self.program, query, limit)
    }
}
