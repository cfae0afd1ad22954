//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ToolError;

/// Map domain/service errors to the `[ERROR]`-prefixed line printed on failure.
pub fn map_error(e: &ToolError) -> String {
    format!("[ERROR] {}", e)
}
