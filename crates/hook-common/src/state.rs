//! Single-value marker files kept between sessions.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A file holding one line, always rewritten whole.
#[derive(Debug, Clone)]
pub struct MarkerFile {
    path: PathBuf,
}

impl MarkerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored value. Missing, unreadable, or blank files yield None.
    pub fn read(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        let value = content.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Overwrite the file with `value`. The parent directory must exist.
    pub fn write(&self, value: &str) -> Result<()> {
        fs::write(&self.path, format!("{}\n", value.trim()))
            .with_context(|| format!("Failed to write marker file: {}", self.path.display()))
    }
}
