//! Dataset Resolver
//!
//! Runs a catalog query for a dataset, turns the returned logical file names into
//! remote access paths by prefixing a redirector, and writes them as a [`FileList`].

mod catalog;

pub use catalog::{CatalogQuery, DasClient};

use crate::error::ToolError;
use crate::filelist::FileList;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

pub const GLOBAL_REDIRECTOR: &str = "root://cms-xrd-global.cern.ch/";
pub const INFN_REDIRECTOR: &str = "root://xrootd-cms.infn.it//";

/// Shown when a query returns nothing; an empty result and a failed query look the same.
pub const EMPTY_RESULT_DIAGNOSTIC: &str =
    "No files found. Please check your proxy (voms-proxy-init) or the dataset name.";

/// Resolver section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Catalog query executable
    #[serde(default = "default_query_program")]
    pub query_program: String,

    /// `global`, `infn`, or a literal URL prefix
    #[serde(default = "default_redirector")]
    pub redirector: String,

    /// Default output list path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Number of entries echoed after a successful resolution
    #[serde(default = "default_preview")]
    pub preview: usize,
}

fn default_query_program() -> String {
    "dasgoclient".to_string()
}

fn default_redirector() -> String {
    "global".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("file_list.txt")
}

fn default_preview() -> usize {
    3
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            query_program: default_query_program(),
            redirector: default_redirector(),
            output: default_output(),
            preview: default_preview(),
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.query_program.trim().is_empty() {
            return Err("query_program cannot be empty".to_string());
        }
        self.redirector.parse::<Redirector>()?;
        Ok(())
    }
}

/// Remote access redirector prepended to every logical file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirector {
    /// CMS global XRootD redirector
    Global,
    /// INFN regional redirector
    Infn,
    Custom(String),
}

impl Redirector {
    pub fn prefix(&self) -> &str {
        match self {
            Redirector::Global => GLOBAL_REDIRECTOR,
            Redirector::Infn => INFN_REDIRECTOR,
            Redirector::Custom(prefix) => prefix,
        }
    }
}

impl FromStr for Redirector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("redirector cannot be empty".to_string()),
            "global" => Ok(Redirector::Global),
            "infn" => Ok(Redirector::Infn),
            other if other.contains("://") => Ok(Redirector::Custom(other.to_string())),
            other => Err(format!(
                "unknown redirector '{}' (use 'global', 'infn', or a root:// URL)",
                other
            )),
        }
    }
}

impl fmt::Display for Redirector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Outcome of one dataset resolution
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub dataset: String,
    pub redirector: String,
    pub files: FileList,
    /// Present when the query produced no files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Resolves datasets through a [`CatalogQuery`]
pub struct DatasetResolver<Q: CatalogQuery> {
    query: Q,
    redirector: Redirector,
}

impl<Q: CatalogQuery> DatasetResolver<Q> {
    pub fn new(query: Q, redirector: Redirector) -> Self {
        Self { query, redirector }
    }

    /// Query the catalog and map every returned token to `redirector + token`, in order.
    ///
    /// Tokens are not validated; whatever the query tool prints passes through.
    pub fn resolve(&self, dataset: &str) -> Result<Resolution, ToolError> {
        let dataset = dataset.trim();
        if dataset.is_empty() {
            return Err(ToolError::InvalidArgument(
                "dataset name cannot be empty".to_string(),
            ));
        }

        info!(dataset, query = %self.query.describe(dataset), "Executing catalog query");
        let raw = self.query.query(dataset)?;
        let files = prefix_entries(self.redirector.prefix(), &raw);

        let diagnostic = if files.is_empty() {
            warn!(dataset, "Catalog query returned no files");
            Some(EMPTY_RESULT_DIAGNOSTIC.to_string())
        } else {
            info!(dataset, count = files.len(), "Catalog query resolved files");
            None
        };

        Ok(Resolution {
            dataset: dataset.to_string(),
            redirector: self.redirector.prefix().to_string(),
            files,
            diagnostic,
            output: None,
        })
    }

    /// Resolve and write the list to `output`. An empty result still writes an empty file.
    pub fn resolve_to_file(&self, dataset: &str, output: &Path) -> Result<Resolution, ToolError> {
        let mut resolution = self.resolve(dataset)?;
        resolution.files.write(output)?;
        resolution.output = Some(output.to_path_buf());
        Ok(resolution)
    }
}

/// Split query output on whitespace and prefix each token.
pub fn prefix_entries(prefix: &str, raw: &str) -> FileList {
    FileList::new(
        raw.split_whitespace()
            .map(|lfn| format!("{}{}", prefix, lfn))
            .collect(),
    )
}
