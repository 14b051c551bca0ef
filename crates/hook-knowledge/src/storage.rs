//! JSONL storage for knowledge entries.
//!
//! The live file is append-only. Once it grows past [`ROTATE_THRESHOLD`]
//! lines, the oldest [`ROTATE_BATCH`] lines move to the archive file.

use crate::schema::KnowledgeEntry;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use thiserror::Error;

pub const ROTATE_THRESHOLD: usize = 1000;
pub const ROTATE_BATCH: usize = 500;

const KNOWLEDGE_FILE: &str = "knowledge.jsonl";
const ARCHIVE_FILE: &str = "knowledge.archive.jsonl";

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(std::path::PathBuf),

    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode knowledge entry: {0}")]
    Encode(#[from] serde_json::Error),
}

fn io_err(action: &'static str, path: &Utf8Path) -> impl FnOnce(std::io::Error) -> KnowledgeError {
    let path = path.to_owned();
    move |source| KnowledgeError::Io {
        action,
        path,
        source,
    }
}

/// What a rotation check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    /// Under the threshold, nothing moved
    NotNeeded,
    Rotated { archived: usize, kept: usize },
}

/// JSONL-based knowledge storage.
#[derive(Debug, Clone)]
pub struct KnowledgeStorage {
    path: Utf8PathBuf,
    archive_path: Utf8PathBuf,
}

impl KnowledgeStorage {
    /// Storage rooted in a memory directory (normally `.beads/memory`).
    pub fn new(memory_dir: impl Into<Utf8PathBuf>) -> Self {
        let dir = memory_dir.into();
        Self {
            path: dir.join(KNOWLEDGE_FILE),
            archive_path: dir.join(ARCHIVE_FILE),
        }
    }

    /// Storage under `<root>/.beads/memory`.
    pub fn in_project(root: &std::path::Path) -> Result<Self, KnowledgeError> {
        let dir = hook_common::config::memory_dir(root);
        let dir = Utf8PathBuf::from_path_buf(dir).map_err(KnowledgeError::NonUtf8Path)?;
        Ok(Self::new(dir))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn archive_path(&self) -> &Utf8Path {
        &self.archive_path
    }

    /// Ensure storage directory exists.
    pub fn ensure_dir(&self) -> Result<(), KnowledgeError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err("create", parent))?;
        }
        Ok(())
    }

    /// Append one entry as a single line.
    pub fn append(&self, entry: &KnowledgeEntry) -> Result<(), KnowledgeError> {
        self.ensure_dir()?;

        let line = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err("open", &self.path))?;
        writeln!(file, "{}", line).map_err(io_err("append to", &self.path))?;
        Ok(())
    }

    /// Load all entries, skipping blank and unparseable lines.
    pub fn load_all(&self) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.path).map_err(io_err("open", &self.path))?;
        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(io_err("read", &self.path))?;
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(entry) = serde_json::from_str::<KnowledgeEntry>(&line) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    /// Move the oldest lines to the archive when the live file is too long.
    ///
    /// Lines are moved verbatim, in order. The archive is appended to before
    /// the live file is rewritten, so a failure can duplicate lines but never
    /// lose them.
    pub fn rotate_if_needed(&self) -> Result<RotationOutcome, KnowledgeError> {
        let content = fs::read_to_string(&self.path).map_err(io_err("read", &self.path))?;
        // Split on '\n' only so CRLF lines move byte-for-byte.
        let lines: Vec<&str> = content.split('\n').filter(|l| !l.is_empty()).collect();
        if lines.len() <= ROTATE_THRESHOLD {
            return Ok(RotationOutcome::NotNeeded);
        }

        let (to_archive, to_keep) = lines.split_at(ROTATE_BATCH);

        let mut archive = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.archive_path)
            .map_err(io_err("open", &self.archive_path))?;
        archive
            .write_all(join_lines(to_archive).as_bytes())
            .map_err(io_err("append to", &self.archive_path))?;

        fs::write(&self.path, join_lines(to_keep)).map_err(io_err("rewrite", &self.path))?;

        Ok(RotationOutcome::Rotated {
            archived: to_archive.len(),
            kept: to_keep.len(),
        })
    }

    /// Append, then rotate. The append has already happened when the
    /// rotation result is inspected.
    pub fn append_and_rotate(
        &self,
        entry: &KnowledgeEntry,
    ) -> Result<Result<RotationOutcome, KnowledgeError>, KnowledgeError> {
        self.append(entry)?;
        Ok(self.rotate_if_needed())
    }
}

fn join_lines(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
