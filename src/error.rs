//! Error types for the anagen toolchain.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem-related errors
#[derive(Debug, Error)]
pub enum FsError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to move {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to set permissions on {path}: {source}")]
    Permissions {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FsError {
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsError::CreateDir {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsError::Write {
            path: path.into(),
            source,
        }
    }

    pub fn remove(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsError::Remove {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while editing a generated class header
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkeletonError {
    #[error("Header does not declare class '{0}'")]
    MissingClass(String),

    #[error("Class '{0}' has no public section to extend")]
    MissingPublicSection(String),

    #[error("Member '{0}' is already declared in the header")]
    DuplicateField(String),
}

/// Top-level error for resolver, scaffold and submit operations
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Cannot open sample file: {0}")]
    SampleOpen(PathBuf),

    #[error("TTree '{0}' not found in sample file")]
    TableNotFound(String),

    #[error("Skeleton generation failed: {0}")]
    GeneratorFailed(String),

    #[error("Generator did not produce expected file: {0}")]
    MissingArtifact(PathBuf),

    #[error("Output directory already exists: {0} (use --force to regenerate it)")]
    OutputExists(PathBuf),

    #[error("Header edit failed: {0}")]
    Skeleton(#[from] SkeletonError),

    #[error("Catalog query failed: {0}")]
    QueryFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Fs(#[from] FsError),
}

impl From<config::ConfigError> for ToolError {
    fn from(err: config::ConfigError) -> Self {
        ToolError::ConfigError(err.to_string())
    }
}

impl From<toml::de::Error> for ToolError {
    fn from(err: toml::de::Error) -> Self {
        ToolError::ConfigError(err.to_string())
    }
}
