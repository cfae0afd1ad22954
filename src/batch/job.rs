//! Job configuration: one job per line, whitespace-separated fields.

use crate::error::FsError;
use crate::fsutil;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Field layout of a job configuration line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobFormat {
    /// `<input_list> <label>`
    Reduced,
    /// `<input_list> <label> <weight> <is_data> <process>`
    Full,
}

impl JobFormat {
    pub fn field_count(self) -> usize {
        match self {
            JobFormat::Reduced => 2,
            JobFormat::Full => 5,
        }
    }
}

/// A validated job line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSpec {
    pub input_list: PathBuf,
    /// Output label; also the per-job directory name and remote subdirectory
    pub label: String,
    /// Kept verbatim so the argument table reproduces what the user wrote
    pub weight: String,
    pub is_data: bool,
    pub process: String,
}

impl JobSpec {
    /// Parse one non-comment line. Extra trailing fields are ignored.
    pub fn parse_line(line: &str, format: JobFormat) -> Result<Self, String> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let required = format.field_count();
        if parts.len() < required {
            return Err(format!(
                "expected {} fields, found {}",
                required,
                parts.len()
            ));
        }

        let label = parts[1];
        if !is_plain_component(label) {
            return Err(format!(
                "output label '{}' must be a single directory name",
                label
            ));
        }

        match format {
            JobFormat::Reduced => Ok(Self {
                input_list: PathBuf::from(parts[0]),
                label: label.to_string(),
                weight: "1.0".to_string(),
                is_data: false,
                process: label.to_string(),
            }),
            JobFormat::Full => {
                let weight = parts[2];
                match weight.parse::<f64>() {
                    Ok(w) if w.is_finite() => {}
                    _ => return Err(format!("weight '{}' is not a number", weight)),
                }
                let is_data = match parts[3] {
                    "0" => false,
                    "1" => true,
                    other => return Err(format!("data flag '{}' must be 0 or 1", other)),
                };
                Ok(Self {
                    input_list: PathBuf::from(parts[0]),
                    label: label.to_string(),
                    weight: weight.to_string(),
                    is_data,
                    process: parts[4].to_string(),
                })
            }
        }
    }

    pub fn data_flag(&self) -> &'static str {
        if self.is_data {
            "1"
        } else {
            "0"
        }
    }
}

fn is_plain_component(label: &str) -> bool {
    !label.is_empty()
        && label != "."
        && label != ".."
        && !label.contains('/')
        && !label.contains('\\')
}

/// One significant line of a job configuration file
#[derive(Debug, Clone)]
pub struct JobLine {
    /// 1-based line number in the file
    pub number: usize,
    pub text: String,
    pub parsed: Result<JobSpec, String>,
}

/// Parsed job configuration file
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub lines: Vec<JobLine>,
}

impl JobConfig {
    /// Parse config text; blank lines and `#` comments are skipped.
    pub fn parse(text: &str, format: JobFormat) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .filter_map(|(idx, raw)| {
                let trimmed = raw.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return None;
                }
                Some(JobLine {
                    number: idx + 1,
                    text: trimmed.to_string(),
                    parsed: JobSpec::parse_line(trimmed, format),
                })
            })
            .collect();
        Self { lines }
    }

    pub fn read(path: &Path, format: JobFormat) -> Result<Self, FsError> {
        let text = fsutil::read_to_string(path)?;
        Ok(Self::parse(&text, format))
    }
}
