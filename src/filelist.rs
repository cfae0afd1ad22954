//! Flat file lists: one access path per line.
//!
//! Produced by the resolver, consumed by the batch submitter and by the generated
//! executable. Blank lines and `#` comments are skipped on read.

use crate::error::FsError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered sequence of access paths. Source order is preserved; duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileList {
    entries: Vec<String>,
}

impl FileList {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Parse list text, skipping blank lines and `#` comments.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    pub fn read(path: &Path) -> Result<Self, FsError> {
        let text = std::fs::read_to_string(path).map_err(|e| FsError::read(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Write one entry per line. An empty list produces an empty file.
    pub fn write(&self, path: &Path) -> Result<(), FsError> {
        std::fs::write(path, self.to_text()).map_err(|e| FsError::write(path, e))
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(entry);
            text.push('\n');
        }
        text
    }

    /// First `n` entries, or all of them when the list is shorter.
    pub fn preview(&self, n: usize) -> &[String] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FileList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
