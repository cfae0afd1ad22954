//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::batch::{BatchSubmitter, CondorSubmit, SubmitSettings, SUBMIT_SETTINGS_FILE};
use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_json, format_resolution_text, format_scaffold_text, format_submit_text,
};
use crate::config::{AnagenConfig, ConfigLoader};
use crate::error::ToolError;
use crate::fsutil;
use crate::resolver::{DasClient, DatasetResolver, Redirector};
use crate::scaffold::{RootMakeClass, ScaffoldRequest, ScaffoldService, Variant};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(format: &str) -> Result<Self, ToolError> {
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ToolError::InvalidArgument(format!(
                "unknown output format '{}' (use text or json)",
                other
            ))),
        }
    }
}

/// Runtime context for CLI execution: workspace root and the loaded configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: AnagenConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ToolError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ToolError::ConfigError(messages.join("; "))
        })?;

        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &AnagenConfig {
        &self.config
    }

    fn workspace_path(&self, path: &Path) -> PathBuf {
        fsutil::resolve_against(&self.workspace_root, path)
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ToolError> {
        info!(command = command_name(command), "Executing command");
        match command {
            Commands::Resolve {
                dataset,
                output,
                redirector,
                format,
            } => self.handle_resolve(dataset, output.as_deref(), redirector.as_deref(), format),
            Commands::Scaffold {
                file,
                tree,
                class_name,
                variant,
                output_dir,
                force,
            } => {
                let variant = match variant {
                    Some(v) => v.parse::<Variant>().map_err(ToolError::InvalidArgument)?,
                    None => self.config.scaffold.variant,
                };
                let class_name = class_name
                    .clone()
                    .unwrap_or_else(|| self.config.scaffold.class_name.clone());
                let output_dir = match output_dir {
                    Some(dir) => self.workspace_path(dir),
                    None => self.workspace_root.join(&class_name),
                };
                let request = ScaffoldRequest {
                    sample: self.workspace_path(file),
                    tree: tree
                        .clone()
                        .unwrap_or_else(|| self.config.scaffold.tree.clone()),
                    class_name,
                    variant,
                    output_dir,
                    workspace: self.workspace_root.clone(),
                    force: *force,
                };
                self.handle_scaffold(&request)
            }
            Commands::Submit {
                config_file,
                framework,
                dry_run,
                format,
            } => self.handle_submit(config_file, framework.as_deref(), *dry_run, format),
        }
    }

    fn handle_resolve(
        &self,
        dataset: &str,
        output: Option<&Path>,
        redirector: Option<&str>,
        format: &str,
    ) -> Result<String, ToolError> {
        let format = OutputFormat::parse(format)?;
        let redirector: Redirector = redirector
            .unwrap_or(&self.config.resolver.redirector)
            .parse()
            .map_err(ToolError::InvalidArgument)?;
        let output = self.workspace_path(output.unwrap_or(&self.config.resolver.output));

        let resolver = DatasetResolver::new(
            DasClient::new(self.config.resolver.query_program.clone()),
            redirector,
        );
        let resolution = resolver.resolve_to_file(dataset, &output)?;

        Ok(match format {
            OutputFormat::Json => format_json(&resolution),
            OutputFormat::Text => format_resolution_text(&resolution, self.config.resolver.preview),
        })
    }

    fn handle_scaffold(&self, request: &ScaffoldRequest) -> Result<String, ToolError> {
        let service = ScaffoldService::new(
            RootMakeClass::new(self.config.scaffold.root_program.clone()),
            self.config.submit.clone(),
            self.config.scaffold.executable.clone(),
        );
        let report = service.generate(request)?;
        Ok(format_scaffold_text(&report))
    }

    fn handle_submit(
        &self,
        config_file: &Path,
        framework: Option<&Path>,
        dry_run: bool,
        format: &str,
    ) -> Result<String, ToolError> {
        let format = OutputFormat::parse(format)?;
        let framework_dir = match framework {
            Some(dir) => self.workspace_path(dir),
            None => self.workspace_root.clone(),
        };
        let settings_path = framework_dir.join(SUBMIT_SETTINGS_FILE);
        if !settings_path.is_file() {
            return Err(ToolError::ConfigError(format!(
                "{} not found; run 'anagen scaffold' to generate the framework first",
                settings_path.display()
            )));
        }
        let settings = SubmitSettings::load(&settings_path)?;
        let client = CondorSubmit::new(settings.submit_program.clone());

        let submitter = BatchSubmitter::new(&framework_dir, settings, client)?.with_dry_run(dry_run);
        let report = submitter.run(&self.workspace_path(config_file))?;

        Ok(match format {
            OutputFormat::Json => format_json(&report),
            OutputFormat::Text => format_submit_text(&report),
        })
    }
}
