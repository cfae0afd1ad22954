//! Schema-to-skeleton generation backends.

use crate::error::ToolError;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, info};

/// Exit code of the ROOT snippet when the sample cannot be opened.
const EXIT_SAMPLE_OPEN: i32 = 2;
/// Exit code of the ROOT snippet when the tree is absent.
const EXIT_TABLE_MISSING: i32 = 3;
const ENTRIES_MARKER: &str = "ANAGEN_ENTRIES";

/// What the generator learned about the requested tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub entries: Option<u64>,
}

/// Files written by a generator run
#[derive(Debug, Clone)]
pub struct GeneratedSkeleton {
    pub header: PathBuf,
    pub source: PathBuf,
}

/// Emits a class skeleton (header + source) from a tree's schema
pub trait SkeletonGenerator {
    /// Check that the sample opens and contains `tree`.
    fn inspect(&self, sample: &Path, tree: &str) -> Result<TableInfo, ToolError>;

    /// Write `<class_name>.h` and `<class_name>.C` into `work_dir`.
    fn generate(
        &self,
        sample: &Path,
        tree: &str,
        class_name: &str,
        work_dir: &Path,
    ) -> Result<GeneratedSkeleton, ToolError>;
}

/// Runs `TTree::MakeClass` through the ROOT interpreter in batch mode
#[derive(Debug, Clone)]
pub struct RootMakeClass {
    program: String,
}

impl RootMakeClass {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Interpreter statements; MakeClass is appended only when generating.
    fn statements(sample: &Path, tree: &str, class_name: Option<&str>) -> Vec<String> {
        let mut statements = vec![
            format!(
                "TFile *anagen_file = TFile::Open({}, \"READ\");",
                cpp_string(&sample.to_string_lossy())
            ),
            format!(
                "if (!anagen_file || anagen_file->IsZombie()) gSystem->Exit({});",
                EXIT_SAMPLE_OPEN
            ),
            format!(
                "TTree *anagen_tree = dynamic_cast<TTree*>(anagen_file->Get({}));",
                cpp_string(tree)
            ),
            format!("if (!anagen_tree) gSystem->Exit({});", EXIT_TABLE_MISSING),
            format!(
                "std::cout << \"{} \" << anagen_tree->GetEntries() << std::endl;",
                ENTRIES_MARKER
            ),
        ];
        if let Some(class_name) = class_name {
            statements.push(format!("anagen_tree->MakeClass({});", cpp_string(class_name)));
        }
        statements.push("anagen_file->Close();".to_string());
        statements
    }

    fn run(&self, statements: &[String], work_dir: Option<&Path>) -> Result<Output, ToolError> {
        let mut command = Command::new(&self.program);
        command.args(["-l", "-b", "-q"]);
        for statement in statements {
            command.arg("-e").arg(statement);
        }
        if let Some(dir) = work_dir {
            command.current_dir(dir);
        }
        debug!(program = %self.program, ?work_dir, "Running ROOT");
        command.output().map_err(|e| {
            ToolError::GeneratorFailed(format!("failed to run {}: {}", self.program, e))
        })
    }

    fn check(output: &Output, sample: &Path, tree: &str) -> Result<TableInfo, ToolError> {
        match output.status.code() {
            Some(0) => Ok(TableInfo {
                entries: parse_entries(&String::from_utf8_lossy(&output.stdout)),
            }),
            Some(EXIT_SAMPLE_OPEN) => Err(ToolError::SampleOpen(sample.to_path_buf())),
            Some(EXIT_TABLE_MISSING) => Err(ToolError::TableNotFound(tree.to_string())),
            code => Err(ToolError::GeneratorFailed(format!(
                "ROOT exited with status {:?}: {}",
                code,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}

impl Default for RootMakeClass {
    fn default() -> Self {
        Self::new("root")
    }
}

impl SkeletonGenerator for RootMakeClass {
    fn inspect(&self, sample: &Path, tree: &str) -> Result<TableInfo, ToolError> {
        let output = self.run(&Self::statements(sample, tree, None), None)?;
        let info = Self::check(&output, sample, tree)?;
        info!(tree, entries = ?info.entries, "Found tree in sample file");
        Ok(info)
    }

    fn generate(
        &self,
        sample: &Path,
        tree: &str,
        class_name: &str,
        work_dir: &Path,
    ) -> Result<GeneratedSkeleton, ToolError> {
        info!(class_name, work_dir = %work_dir.display(), "Running MakeClass");
        let output = self.run(
            &Self::statements(sample, tree, Some(class_name)),
            Some(work_dir),
        )?;
        Self::check(&output, sample, tree)?;
        Ok(GeneratedSkeleton {
            header: work_dir.join(format!("{}.h", class_name)),
            source: work_dir.join(format!("{}.C", class_name)),
        })
    }
}

/// Quote a value as a C++ string literal.
fn cpp_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn parse_entries(stdout: &str) -> Option<u64> {
    stdout.lines().find_map(|line| {
        line.trim()
            .strip_prefix(ENTRIES_MARKER)
            .and_then(|rest| rest.trim().parse().ok())
    })
}
