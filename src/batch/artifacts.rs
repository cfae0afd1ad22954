//! Wrapper script and HTCondor submit description for one job.

use super::chunk::JobDir;
use super::job::JobFormat;
use super::settings::SubmitSettings;
use crate::error::FsError;
use crate::fsutil;
use indoc::formatdoc;
use std::path::Path;

/// Renders the per-job wrapper and submit description
pub struct JobArtifacts<'a> {
    pub settings: &'a SubmitSettings,
    pub framework_dir: &'a Path,
    pub job_dir: &'a JobDir,
}

impl JobArtifacts<'_> {
    /// Wrapper run by each task. Arguments: `$1` chunk, `$2` output name, `$3` remote
    /// destination, `$4` weight, `$5` data flag, `$6` process.
    pub fn wrapper(&self) -> String {
        let exe = &self.settings.executable;
        let (run, upload) = match self.settings.job_format {
            JobFormat::Full => (
                format!("./{} $1 $2 $4 $5 $6", exe),
                format!(
                    "# Copy output to remote storage\n{} -f $2 {}$3/$2\nrm $2\n",
                    self.settings.upload_program, self.settings.storage_endpoint
                ),
            ),
            JobFormat::Reduced => (format!("./{} $1", exe), String::new()),
        };

        formatdoc! {r#"
            #!/bin/bash
            cd "{framework}"
            source {env_setup}
            {runtime_setup}
            # Verify executable
            if [ ! -f ./{exe} ]; then
                echo 'ERROR: {exe} not found! Please run "make" first.'
                exit 1
            fi
            # Run analyzer
            {run}
            {upload}"#,
            framework = self.framework_dir.display(),
            env_setup = self.settings.env_setup,
            runtime_setup = self.settings.runtime_setup,
            exe = exe,
            run = run,
            upload = upload,
        }
    }

    /// Submit description that queues one task per arguments-table row.
    pub fn submit_description(&self) -> String {
        let dir = self.job_dir.path().display();
        formatdoc! {r#"
            executable = {wrapper}
            arguments = $(args)
            output = {dir}/job.$(ClusterId).$(ProcId).out
            error = {dir}/job.$(ClusterId).$(ProcId).err
            log = {dir}/job.log
            getenv = True
            +JobFlavour = "{flavour}"
            queue args from {arguments}
        "#,
            wrapper = self.job_dir.wrapper_path().display(),
            dir = dir,
            flavour = self.settings.job_flavour,
            arguments = self.job_dir.arguments_path().display(),
        }
    }

    /// Write `wrapper.sh` (mode 755) and `job.sub`.
    pub fn write(&self) -> Result<(), FsError> {
        let wrapper = self.job_dir.wrapper_path();
        fsutil::write(&wrapper, self.wrapper())?;
        fsutil::make_executable(&wrapper)?;
        fsutil::write(&self.job_dir.submit_path(), self.submit_description())
    }
}
