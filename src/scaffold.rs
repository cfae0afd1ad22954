//! Scaffold Generator
//!
//! Builds an analysis framework directory from a sample file: a class skeleton generated
//! from the tree schema, an entry point, a Makefile, and the batch submission settings
//! consumed by `anagen submit`.

pub mod generator;
pub mod header;
pub mod layout;
pub mod templates;

pub use generator::{GeneratedSkeleton, RootMakeClass, SkeletonGenerator, TableInfo};
pub use header::{FieldDecl, HeaderSkeleton};
pub use layout::OutputLayout;

use crate::batch::{render_submit_script, JobFormat, SubmitConfig, SubmitSettings};
use crate::error::ToolError;
use crate::fsutil;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use templates::{AnalysisSource, BuildScript, CollectionSpec, MainProgram};
use tracing::{info, warn};

/// Framework flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Flat directory, generated skeleton kept as is
    Basic,
    /// `include/`, `src/`, `condor/` layout, generated skeleton kept as is
    Structured,
    /// Structured layout, user fields injected, analysis loop replaced
    Advanced,
}

impl Variant {
    pub fn structured_layout(self) -> bool {
        matches!(self, Variant::Structured | Variant::Advanced)
    }

    /// Inject user fields into the header and replace the generated `Loop()`.
    pub fn extends_skeleton(self) -> bool {
        self == Variant::Advanced
    }

    pub fn job_format(self) -> JobFormat {
        match self {
            Variant::Advanced => JobFormat::Full,
            Variant::Basic | Variant::Structured => JobFormat::Reduced,
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Variant::Basic),
            "structured" => Ok(Variant::Structured),
            "advanced" => Ok(Variant::Advanced),
            other => Err(format!(
                "unknown variant '{}' (use basic, structured, or advanced)",
                other
            )),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Basic => "basic",
            Variant::Structured => "structured",
            Variant::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

/// Scaffold section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    #[serde(default = "default_tree")]
    pub tree: String,

    #[serde(default = "default_class_name")]
    pub class_name: String,

    #[serde(default = "default_variant")]
    pub variant: Variant,

    /// ROOT interpreter executable
    #[serde(default = "default_root_program")]
    pub root_program: String,

    /// Name of the compiled analysis executable
    #[serde(default = "default_executable")]
    pub executable: String,
}

fn default_tree() -> String {
    "Events".to_string()
}

fn default_class_name() -> String {
    "CMSAnalyzer".to_string()
}

fn default_variant() -> Variant {
    Variant::Advanced
}

fn default_root_program() -> String {
    "root".to_string()
}

fn default_executable() -> String {
    "runAnalysis".to_string()
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            tree: default_tree(),
            class_name: default_class_name(),
            variant: default_variant(),
            root_program: default_root_program(),
            executable: default_executable(),
        }
    }
}

impl ScaffoldConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.tree.trim().is_empty() {
            return Err("tree cannot be empty".to_string());
        }
        if !header::is_identifier(&self.class_name) {
            return Err(format!(
                "class_name '{}' is not a valid C++ identifier",
                self.class_name
            ));
        }
        if self.root_program.trim().is_empty() {
            return Err("root_program cannot be empty".to_string());
        }
        if self.executable.is_empty() || self.executable.contains('/') {
            return Err(format!(
                "executable '{}' must be a plain file name",
                self.executable
            ));
        }
        Ok(())
    }
}

/// One scaffold run
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub sample: PathBuf,
    pub tree: String,
    pub class_name: String,
    pub variant: Variant,
    pub output_dir: PathBuf,
    /// Never removed by `force`, nor any directory containing it
    pub workspace: PathBuf,
    /// Replace an existing output directory instead of failing
    pub force: bool,
}

impl ScaffoldRequest {
    fn validate(&self) -> Result<(), ToolError> {
        if self.sample.as_os_str().is_empty() {
            return Err(ToolError::InvalidArgument(
                "sample file path cannot be empty".to_string(),
            ));
        }
        if self.tree.trim().is_empty() {
            return Err(ToolError::InvalidArgument(
                "tree name cannot be empty".to_string(),
            ));
        }
        if !header::is_identifier(&self.class_name) {
            return Err(ToolError::InvalidArgument(format!(
                "class name '{}' is not a valid C++ identifier",
                self.class_name
            )));
        }
        Ok(())
    }
}

/// Result of a scaffold run
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    pub output_dir: PathBuf,
    pub class_name: String,
    pub tree: String,
    pub variant: Variant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<u64>,
    pub replaced_existing: bool,
    /// Collections looped over by the generated analysis source
    pub collections: Vec<String>,
    pub files: Vec<PathBuf>,
}

/// Runs the generation pipeline with a pluggable [`SkeletonGenerator`]
pub struct ScaffoldService<G: SkeletonGenerator> {
    generator: G,
    submit: SubmitConfig,
    executable: String,
    collections: Vec<CollectionSpec>,
}

impl<G: SkeletonGenerator> ScaffoldService<G> {
    pub fn new(generator: G, submit: SubmitConfig, executable: impl Into<String>) -> Self {
        Self {
            generator,
            submit,
            executable: executable.into(),
            collections: templates::default_collections(),
        }
    }

    /// Generate the framework.
    ///
    /// Precondition failures abort before the output directory is touched. Failures after
    /// that leave the partially written directory in place; rerun with `force`.
    pub fn generate(&self, request: &ScaffoldRequest) -> Result<ScaffoldReport, ToolError> {
        request.validate()?;
        let variant = request.variant;
        info!(
            sample = %request.sample.display(),
            tree = %request.tree,
            class_name = %request.class_name,
            %variant,
            "Generating framework"
        );

        // The generator runs inside the output directory, so a relative sample would
        // resolve against the wrong place.
        let sample = fsutil::absolute(&request.sample)
            .map_err(|_| ToolError::SampleOpen(request.sample.clone()))?;
        let table = self.generator.inspect(&sample, &request.tree)?;

        let layout = OutputLayout::new(
            &request.output_dir,
            &request.class_name,
            variant.structured_layout(),
        );
        let mut protected = vec![sample.clone(), request.workspace.clone()];
        if let Ok(cwd) = std::env::current_dir() {
            protected.push(cwd);
        }
        let replaced_existing = layout.prepare(request.force, &protected)?;
        let layout = OutputLayout::new(
            fsutil::absolute(layout.root())?,
            &request.class_name,
            variant.structured_layout(),
        );

        let generated = self.generator.generate(
            &sample,
            &request.tree,
            &request.class_name,
            layout.root(),
        )?;
        for artifact in [&generated.header, &generated.source] {
            if !artifact.is_file() {
                return Err(ToolError::MissingArtifact(artifact.clone()));
            }
        }

        let mut files = Vec::new();
        let collections = if variant.extends_skeleton() {
            self.extend_skeleton(&generated, &layout, &request.class_name)?
        } else {
            fsutil::relocate(&generated.header, &layout.header_path())?;
            fsutil::relocate(&generated.source, &layout.source_path())?;
            Vec::new()
        };
        files.push(layout.header_path());
        files.push(layout.source_path());

        let main = MainProgram {
            class_name: &request.class_name,
            tree: &request.tree,
            overrides: variant.extends_skeleton(),
        };
        write_file(&layout.main_path(), &main.render(), &mut files)?;

        let makefile = BuildScript {
            class_name: &request.class_name,
            executable: &self.executable,
            structured: layout.is_structured(),
            generated_at: Utc::now(),
        };
        write_file(&layout.makefile_path(), &makefile.render(), &mut files)?;

        let settings =
            SubmitSettings::from_config(&self.submit, &self.executable, variant.job_format())?;
        settings.write(&layout.submit_settings_path())?;
        files.push(layout.submit_settings_path());

        let script = layout.submit_script_path();
        write_file(&script, &render_submit_script(layout.root()), &mut files)?;
        fsutil::make_executable(&script)?;

        info!(output_dir = %layout.root().display(), files = files.len(), "Framework generated");
        Ok(ScaffoldReport {
            output_dir: layout.root().to_path_buf(),
            class_name: request.class_name.clone(),
            tree: request.tree.clone(),
            variant,
            entries: table.entries,
            replaced_existing,
            collections,
            files,
        })
    }

    /// Inject user fields into the header and replace the generated source with the
    /// analysis loop. Returns the names of the collections the loop covers.
    fn extend_skeleton(
        &self,
        generated: &GeneratedSkeleton,
        layout: &OutputLayout,
        class_name: &str,
    ) -> Result<Vec<String>, ToolError> {
        let text = fsutil::read_to_string(&generated.header)?;
        let mut header = HeaderSkeleton::parse(&text, class_name)?;
        header.inject_fields(&templates::user_fields())?;
        fsutil::write(&layout.header_path(), header.render())?;
        if generated.header != layout.header_path() {
            fsutil::remove_file(&generated.header)?;
        }

        let active: Vec<CollectionSpec> = self
            .collections
            .iter()
            .filter(|c| c.is_declared_in(&header))
            .cloned()
            .collect();
        if active.is_empty() {
            warn!(class_name, "No known object collections in tree; Loop() fills nothing");
        }

        let source = AnalysisSource {
            class_name,
            collections: &active,
        };
        fsutil::write(&layout.source_path(), source.render())?;
        if generated.source != layout.source_path() {
            fsutil::remove_file(&generated.source)?;
        }

        Ok(active.iter().map(|c| c.name.to_string()).collect())
    }
}

fn write_file(path: &Path, contents: &str, files: &mut Vec<PathBuf>) -> Result<(), ToolError> {
    fsutil::write(path, contents)?;
    files.push(path.to_path_buf());
    Ok(())
}
