//! Cluster submission client.

use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Hands a submit description to the batch scheduler.
///
/// Returns the client's exit code (`None` if it was killed by a signal) or a launch
/// failure message. The exit code is recorded, never acted on.
pub trait ClusterClient {
    fn submit(&self, submit_file: &Path) -> Result<Option<i32>, String>;
}

/// Runs `condor_submit <job.sub>` with inherited stdio
#[derive(Debug, Clone)]
pub struct CondorSubmit {
    program: String,
}

impl CondorSubmit {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CondorSubmit {
    fn default() -> Self {
        Self::new("condor_submit")
    }
}

impl ClusterClient for CondorSubmit {
    fn submit(&self, submit_file: &Path) -> Result<Option<i32>, String> {
        debug!(program = %self.program, submit_file = %submit_file.display(), "Submitting");
        let status = Command::new(&self.program)
            .arg(submit_file)
            .status()
            .map_err(|e| format!("failed to run {}: {}", self.program, e))?;
        if !status.success() {
            warn!(program = %self.program, code = ?status.code(), "Submission command exited non-zero");
        }
        Ok(status.code())
    }
}
