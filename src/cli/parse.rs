//! CLI parse: clap types for anagen. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// anagen - dataset resolution, analysis scaffolding and HTCondor submission
#[derive(Parser)]
#[command(name = "anagen")]
#[command(about = "Resolve CMS datasets, scaffold ROOT analyzers, and submit them to HTCondor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config lookup and relative paths)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query the data catalog and write a redirector-prefixed file list
    Resolve {
        /// Dataset name, e.g. /TTToSemiLeptonic_.../NANOAODSIM
        dataset: String,
        /// Output file list (default from config: file_list.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Redirector: global, infn, or a root:// prefix
        #[arg(long)]
        redirector: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Generate an analysis framework from a sample file
    Scaffold {
        /// Sample ROOT file used to generate the class skeleton
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
        /// Tree name
        #[arg(short = 't', long = "tree")]
        tree: Option<String>,
        /// Analyzer class name
        #[arg(short = 'c', long = "class")]
        class_name: Option<String>,
        /// Framework flavour (basic, structured, advanced)
        #[arg(long)]
        variant: Option<String>,
        /// Output directory (default: <workspace>/<class>)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Remove and regenerate an existing output directory
        #[arg(long)]
        force: bool,
    },
    /// Write per-job HTCondor files for a job configuration and submit them
    Submit {
        /// Job configuration file, one job per line
        config_file: PathBuf,
        /// Generated framework directory (default: workspace)
        #[arg(long)]
        framework: Option<PathBuf>,
        /// Write every file but do not call the submission command
        #[arg(long)]
        dry_run: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
