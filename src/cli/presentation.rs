//! CLI presentation: text and json formatters per command.

use crate::batch::{SubmissionStatus, SubmitReport};
use crate::resolver::Resolution;
use crate::scaffold::ScaffoldReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Pretty JSON for any report.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_resolution_text(resolution: &Resolution, preview: usize) -> String {
    let mut out = format!("[INFO] Executing query for {}\n", resolution.dataset);
    if let Some(ref diagnostic) = resolution.diagnostic {
        out.push_str(&format!("[WARNING] {}\n", diagnostic));
        if let Some(ref path) = resolution.output {
            out.push_str(&format!("Wrote empty list to {}", path.display()));
        }
        return out;
    }

    let target = resolution
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "[SUCCESS] Found {} files. Saved to {}\n",
        resolution.files.len(),
        target
    ));
    let shown = resolution.files.preview(preview);
    if !shown.is_empty() {
        out.push_str("Preview:\n");
        for entry in shown {
            out.push_str(&format!("  {}\n", entry));
        }
        if resolution.files.len() > shown.len() {
            out.push_str(&format!("  ... and {} more\n", resolution.files.len() - shown.len()));
        }
    }
    out.trim_end().to_string()
}

pub fn format_scaffold_text(report: &ScaffoldReport) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Framework generated"));
    out.push_str(&format!("  Class:   {}\n", report.class_name));
    out.push_str(&format!("  Tree:    {}\n", report.tree));
    out.push_str(&format!("  Variant: {}\n", report.variant));
    if let Some(entries) = report.entries {
        out.push_str(&format!("  Entries: {}\n", entries));
    }
    if report.replaced_existing {
        out.push_str("  Replaced existing output directory\n");
    }
    if !report.collections.is_empty() {
        out.push_str(&format!("  Collections: {}\n", report.collections.join(", ")));
    }
    out.push('\n');

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Generated file"]);
    for file in &report.files {
        let shown = file
            .strip_prefix(&report.output_dir)
            .unwrap_or(file)
            .display()
            .to_string();
        table.add_row(vec![shown]);
    }
    out.push_str(&format!("{}\n\n", table));

    out.push_str(&format!("[DONE] Framework ready in {}\n", report.output_dir.display()));
    out.push_str(&format!(
        "Next: cd {} && make && ./{}",
        report.output_dir.display(),
        crate::batch::SUBMIT_SCRIPT_FILE
    ));
    out
}

pub fn format_submit_text(report: &SubmitReport) -> String {
    let mut out = String::new();
    for issue in &report.issues {
        let severity = if issue.kind.is_error() {
            "[ERROR]"
        } else {
            "[WARNING]"
        };
        out.push_str(&format!("{} line {}: {}\n", severity, issue.line, issue.message));
    }
    if !report.issues.is_empty() {
        out.push('\n');
    }

    if report.jobs.is_empty() {
        out.push_str("No jobs prepared.");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Job", "Process", "Files", "Directory", "Submission"]);
    for job in &report.jobs {
        let status = match &job.submission {
            SubmissionStatus::Skipped => "dry run".to_string(),
            SubmissionStatus::Submitted { code: Some(code) } => format!("exit {}", code),
            SubmissionStatus::Submitted { code: None } => "terminated".to_string(),
            SubmissionStatus::LaunchFailed { message } => format!("failed: {}", message),
        };
        table.add_row(vec![
            job.label.clone(),
            job.process.clone(),
            job.files.to_string(),
            job.job_dir.display().to_string(),
            status,
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    for job in &report.jobs {
        out.push_str(&format!(
            "[JOB] {}: {} chunk(s), queue from {}\n",
            job.label,
            job.files,
            job.arguments.display()
        ));
    }
    let verb = if report.dry_run { "Prepared" } else { "Submitted" };
    out.push_str(&format!(
        "[DONE] {} {} job(s) covering {} file(s); {} line(s) skipped",
        verb,
        report.jobs.len(),
        report.total_files(),
        report.issues.len()
    ));
    out
}
