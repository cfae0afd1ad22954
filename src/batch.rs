//! Batch Submitter
//!
//! Reads a job configuration (one job per line), splits each job's input list into
//! single-file chunks, writes the HTCondor arguments table, wrapper script and submit
//! description under `<framework>/condor/<label>/`, and hands the description to the
//! cluster client.
//!
//! A malformed line or a missing input list skips that job only; the rest of the batch
//! still runs. Every skipped job is reported as a [`JobIssue`].

pub mod artifacts;
pub mod chunk;
pub mod cluster;
pub mod job;
pub mod settings;

pub use artifacts::JobArtifacts;
pub use chunk::{plan_chunks, ArgumentsRow, Chunk, ChunkPlan, JobDir};
pub use cluster::{ClusterClient, CondorSubmit};
pub use job::{JobConfig, JobFormat, JobLine, JobSpec};
pub use settings::{
    render_submit_script, SubmitSettings, SUBMIT_SCRIPT_FILE, SUBMIT_SETTINGS_FILE,
};

use crate::error::ToolError;
use crate::filelist::FileList;
use crate::fsutil;
use crate::scaffold::layout::CONDOR_DIR;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Submit section of the configuration; copied into `submit.toml` at scaffold time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// Remote output root; defaults to the user's CERNBox area
    #[serde(default)]
    pub remote_root: Option<String>,

    /// Script sourced by the wrapper before anything else
    #[serde(default = "default_env_setup")]
    pub env_setup: String,

    /// Shell line run after `env_setup`
    #[serde(default = "default_runtime_setup")]
    pub runtime_setup: String,

    /// Storage endpoint prepended to the remote destination on upload
    #[serde(default = "default_storage_endpoint")]
    pub storage_endpoint: String,

    #[serde(default = "default_upload_program")]
    pub upload_program: String,

    /// `+JobFlavour` hint for the scheduler
    #[serde(default = "default_job_flavour")]
    pub job_flavour: String,

    #[serde(default = "default_submit_program")]
    pub submit_program: String,
}

fn default_env_setup() -> String {
    "/cvmfs/cms.cern.ch/cmsset_default.sh".to_string()
}

fn default_runtime_setup() -> String {
    "eval $(scramv1 runtime -sh)".to_string()
}

fn default_storage_endpoint() -> String {
    "root://eosuser.cern.ch/".to_string()
}

fn default_upload_program() -> String {
    "xrdcp".to_string()
}

fn default_job_flavour() -> String {
    "tomorrow".to_string()
}

fn default_submit_program() -> String {
    "condor_submit".to_string()
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            remote_root: None,
            env_setup: default_env_setup(),
            runtime_setup: default_runtime_setup(),
            storage_endpoint: default_storage_endpoint(),
            upload_program: default_upload_program(),
            job_flavour: default_job_flavour(),
            submit_program: default_submit_program(),
        }
    }
}

impl SubmitConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.submit_program.trim().is_empty() {
            return Err("submit_program cannot be empty".to_string());
        }
        if self.upload_program.trim().is_empty() {
            return Err("upload_program cannot be empty".to_string());
        }
        if let Some(root) = &self.remote_root {
            if !root.starts_with('/') {
                return Err(format!("remote_root '{}' must be an absolute path", root));
            }
        }
        Ok(())
    }
}

/// Why a configuration line produced no submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Malformed,
    MissingList,
    EmptyList,
    Io,
}

impl IssueKind {
    /// Console severity; a missing list is an error, the rest are warnings.
    pub fn is_error(self) -> bool {
        matches!(self, IssueKind::MissingList | IssueKind::Io)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobIssue {
    /// 1-based line in the job configuration
    pub line: usize,
    pub kind: IssueKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum SubmissionStatus {
    /// Dry run; nothing handed to the scheduler
    Skipped,
    Submitted { code: Option<i32> },
    LaunchFailed { message: String },
}

/// A job whose files were written
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub line: usize,
    pub label: String,
    pub process: String,
    pub files: usize,
    pub job_dir: PathBuf,
    pub arguments: PathBuf,
    pub wrapper: PathBuf,
    pub submit_file: PathBuf,
    pub submission: SubmissionStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitReport {
    pub config: PathBuf,
    pub framework_dir: PathBuf,
    pub dry_run: bool,
    pub jobs: Vec<JobOutcome>,
    pub issues: Vec<JobIssue>,
}

impl SubmitReport {
    pub fn total_files(&self) -> usize {
        self.jobs.iter().map(|j| j.files).sum()
    }
}

/// Writes and submits the jobs described by a configuration file
pub struct BatchSubmitter<C: ClusterClient> {
    framework_dir: PathBuf,
    settings: SubmitSettings,
    client: C,
    dry_run: bool,
}

impl<C: ClusterClient> BatchSubmitter<C> {
    pub fn new(framework_dir: &Path, settings: SubmitSettings, client: C) -> Result<Self, ToolError> {
        Ok(Self {
            framework_dir: fsutil::absolute(framework_dir)?,
            settings,
            client,
            dry_run: false,
        })
    }

    /// Write every artifact but never invoke the cluster client.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn framework_dir(&self) -> &Path {
        &self.framework_dir
    }

    pub fn condor_root(&self) -> PathBuf {
        self.framework_dir.join(CONDOR_DIR)
    }

    /// Process every job line. Only an unreadable configuration file is fatal.
    pub fn run(&self, config_path: &Path) -> Result<SubmitReport, ToolError> {
        let config = JobConfig::read(config_path, self.settings.job_format)?;
        info!(
            config = %config_path.display(),
            jobs = config.lines.len(),
            dry_run = self.dry_run,
            "Processing job configuration"
        );

        let mut report = SubmitReport {
            config: config_path.to_path_buf(),
            framework_dir: self.framework_dir.clone(),
            dry_run: self.dry_run,
            jobs: Vec::new(),
            issues: Vec::new(),
        };

        for line in &config.lines {
            match self.process_line(line) {
                Ok(outcome) => report.jobs.push(outcome),
                Err(issue) => {
                    if issue.kind.is_error() {
                        error!(line = issue.line, "{}", issue.message);
                    } else {
                        warn!(line = issue.line, "{}", issue.message);
                    }
                    report.issues.push(issue);
                }
            }
        }

        info!(
            submitted = report.jobs.len(),
            skipped = report.issues.len(),
            "Job configuration processed"
        );
        Ok(report)
    }

    fn process_line(&self, line: &JobLine) -> Result<JobOutcome, JobIssue> {
        let issue = |kind, message: String| JobIssue {
            line: line.number,
            kind,
            message,
        };

        let spec = line.parsed.as_ref().map_err(|reason| {
            issue(
                IssueKind::Malformed,
                format!("Skipping malformed line '{}': {}", line.text, reason),
            )
        })?;

        let list_path = fsutil::resolve_against(&self.framework_dir, &spec.input_list);
        if !list_path.is_file() {
            return Err(issue(
                IssueKind::MissingList,
                format!("File list {} not found", list_path.display()),
            ));
        }
        let files = FileList::read(&list_path)
            .map_err(|e| issue(IssueKind::Io, e.to_string()))?;
        if files.is_empty() {
            return Err(issue(
                IssueKind::EmptyList,
                format!("File list {} is empty; skipping job {}", list_path.display(), spec.label),
            ));
        }

        let job_dir = JobDir::new(&self.condor_root(), &spec.label);
        self.write_job(spec, &files, &job_dir)
            .map_err(|e| issue(IssueKind::Io, e.to_string()))?;

        let submission = if self.dry_run {
            SubmissionStatus::Skipped
        } else {
            match self.client.submit(&job_dir.submit_path()) {
                Ok(code) => SubmissionStatus::Submitted { code },
                Err(message) => {
                    error!(label = %spec.label, "{}", message);
                    SubmissionStatus::LaunchFailed { message }
                }
            }
        };

        info!(label = %spec.label, files = files.len(), "Job prepared");
        Ok(JobOutcome {
            line: line.number,
            label: spec.label.clone(),
            process: spec.process.clone(),
            files: files.len(),
            job_dir: job_dir.path().to_path_buf(),
            arguments: job_dir.arguments_path(),
            wrapper: job_dir.wrapper_path(),
            submit_file: job_dir.submit_path(),
            submission,
        })
    }

    fn write_job(&self, spec: &JobSpec, files: &FileList, job_dir: &JobDir) -> Result<(), ToolError> {
        fsutil::create_dir_all(job_dir.path())?;
        let plan = plan_chunks(spec, files, job_dir, &self.settings.remote_root);
        plan.write(job_dir)?;
        JobArtifacts {
            settings: &self.settings,
            framework_dir: &self.framework_dir,
            job_dir,
        }
        .write()?;
        Ok(())
    }
}
