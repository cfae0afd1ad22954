//! Output directory layout for a generated framework.
//!
//! Every path is derived from the output root; nothing depends on the process
//! working directory.

use crate::batch::{SUBMIT_SCRIPT_FILE, SUBMIT_SETTINGS_FILE};
use crate::error::ToolError;
use crate::fsutil;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CONDOR_DIR: &str = "condor";

#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    class_name: String,
    structured: bool,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>, class_name: impl Into<String>, structured: bool) -> Self {
        Self {
            root: root.into(),
            class_name: class_name.into(),
            structured,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_structured(&self) -> bool {
        self.structured
    }

    pub fn include_dir(&self) -> PathBuf {
        if self.structured {
            self.root.join("include")
        } else {
            self.root.clone()
        }
    }

    pub fn src_dir(&self) -> PathBuf {
        if self.structured {
            self.root.join("src")
        } else {
            self.root.clone()
        }
    }

    pub fn condor_dir(&self) -> PathBuf {
        self.root.join(CONDOR_DIR)
    }

    pub fn header_path(&self) -> PathBuf {
        self.include_dir().join(format!("{}.h", self.class_name))
    }

    pub fn source_path(&self) -> PathBuf {
        self.src_dir().join(format!("{}.C", self.class_name))
    }

    pub fn main_path(&self) -> PathBuf {
        self.root.join("main.cc")
    }

    pub fn makefile_path(&self) -> PathBuf {
        self.root.join("Makefile")
    }

    pub fn submit_settings_path(&self) -> PathBuf {
        self.root.join(SUBMIT_SETTINGS_FILE)
    }

    pub fn submit_script_path(&self) -> PathBuf {
        self.root.join(SUBMIT_SCRIPT_FILE)
    }

    /// Create the directory tree.
    ///
    /// An existing root is rejected unless `force`, in which case it is removed first so
    /// the result never mixes output from two runs. A root that contains any of
    /// `protected` (the sample, the workspace) is never removed. Returns whether
    /// something was replaced.
    pub fn prepare(&self, force: bool, protected: &[PathBuf]) -> Result<bool, ToolError> {
        let replaced = if self.root.exists() {
            if !force {
                return Err(ToolError::OutputExists(self.root.clone()));
            }
            self.check_replaceable(protected)?;
            warn!(path = %self.root.display(), "Removing existing output directory");
            fsutil::remove_path(&self.root)?;
            true
        } else {
            false
        };

        fsutil::create_dir_all(&self.root)?;
        if self.structured {
            fsutil::create_dir_all(&self.src_dir())?;
            fsutil::create_dir_all(&self.include_dir())?;
            fsutil::create_dir_all(&self.condor_dir())?;
        }
        Ok(replaced)
    }

    fn check_replaceable(&self, protected: &[PathBuf]) -> Result<(), ToolError> {
        let root = fsutil::absolute(&self.root)?;
        for path in protected {
            let Ok(path) = fsutil::absolute(path) else {
                continue;
            };
            if path.starts_with(&root) {
                return Err(ToolError::InvalidArgument(format!(
                    "refusing to remove {} with --force: it contains {}",
                    root.display(),
                    path.display()
                )));
            }
        }
        Ok(())
    }
}
