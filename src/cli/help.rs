//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name used as the `command` field of log events.
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Resolve { .. } => "resolve",
        Commands::Scaffold { .. } => "scaffold",
        Commands::Submit { .. } => "submit",
    }
}
