//! Environment-derived settings shared by all hooks.

use std::env;
use std::path::{Path, PathBuf};

/// Explicit project root override.
pub const PROJECT_ROOT_ENV: &str = "CLAUDE_PROJECT_ROOT";
/// Project directory exported by Claude Code.
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";
/// Enables the JSONL debug log when set.
pub const DEBUG_ENV: &str = "CLAUDE_HOOK_DEBUG";

pub const BEADS_DIR: &str = ".beads";

/// Resolve the project root.
///
/// Priority:
/// 1. CLAUDE_PROJECT_ROOT
/// 2. CLAUDE_PROJECT_DIR
/// 3. current working directory
pub fn project_root() -> PathBuf {
    [PROJECT_ROOT_ENV, PROJECT_DIR_ENV]
        .iter()
        .filter_map(|key| env::var_os(key))
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn beads_dir(root: &Path) -> PathBuf {
    root.join(BEADS_DIR)
}

pub fn memory_dir(root: &Path) -> PathBuf {
    beads_dir(root).join("memory")
}

pub fn shared_marker_path(root: &Path) -> PathBuf {
    beads_dir(root).join(".shared-last-seen")
}

pub fn patterns_path(root: &Path) -> PathBuf {
    root.join(".context").join("patterns.md")
}

pub fn shared_dir(root: &Path) -> PathBuf {
    root.join("shared")
}

pub fn debug_marker_path(root: &Path) -> PathBuf {
    root.join(".claude").join(".hook-debug")
}

pub fn debug_log_path(root: &Path) -> PathBuf {
    root.join(".claude").join("logs").join("hook-debug.jsonl")
}
