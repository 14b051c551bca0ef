//! Debug logging for hooks.
//!
//! Hooks never write diagnostics to stdout or stderr, so every decision is
//! instead recorded to a JSONL file when debug mode is on.

use crate::config;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;

const SUMMARY_LIMIT: usize = 200;

/// Debug log entry for hook execution
#[derive(Debug, Serialize)]
pub struct HookDebugLog {
    pub timestamp: DateTime<Utc>,
    /// Hook name (e.g., "finalize-check")
    pub hook_name: String,
    /// Command summary (truncated for large inputs)
    pub command_summary: String,
    /// Decision made (advise/silent/error/...)
    pub decision: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl HookDebugLog {
    pub fn new(hook_name: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            hook_name: hook_name.to_string(),
            command_summary: String::new(),
            decision: String::new(),
            reason: String::new(),
            context: None,
        }
    }

    pub fn with_command(mut self, command: &str) -> Self {
        self.command_summary = if command.chars().count() > SUMMARY_LIMIT {
            let head: String = command.chars().take(SUMMARY_LIMIT).collect();
            format!("{}...", head)
        } else {
            command.to_string()
        };
        self
    }

    pub fn with_decision(mut self, decision: &str, reason: &str) -> Self {
        self.decision = decision.to_string();
        self.reason = reason.to_string();
        self
    }

    pub fn with_context(mut self, context: &str) -> Self {
        self.context = Some(context.to_string());
        self
    }

    /// Write log entry to file
    pub fn write(&self) -> std::io::Result<()> {
        if !is_debug_enabled() {
            return Ok(());
        }

        let log_path = config::debug_log_path(&config::project_root());
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let json = serde_json::to_string(self).unwrap_or_default();
        writeln!(file, "{}", json)?;

        Ok(())
    }
}

/// Check if debug mode is enabled
pub fn is_debug_enabled() -> bool {
    if std::env::var_os(config::DEBUG_ENV).is_some() {
        return true;
    }
    config::debug_marker_path(&config::project_root()).exists()
}

/// Quick helper to log a hook decision
pub fn log_decision(hook_name: &str, command: &str, decision: &str, reason: &str) {
    let log = HookDebugLog::new(hook_name)
        .with_command(command)
        .with_decision(decision, reason);

    let _ = log.write();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_log_serialization() {
        let log = HookDebugLog::new("finalize-check")
            .with_command("bd close proj-1")
            .with_decision("advise", "tracker-close");

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"hook_name\":\"finalize-check\""));
        assert!(json.contains("\"decision\":\"advise\""));
        assert!(!json.contains("context"));
    }

    #[test]
    fn test_context_is_serialized_when_set() {
        let log = HookDebugLog::new("knowledge-capture")
            .with_decision("rotate", "knowledge log over threshold")
            .with_context("archived 500 entries, kept 501");

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"context\":\"archived 500 entries, kept 501\""));
    }

    #[test]
    fn test_truncation() {
        let long_input = "a".repeat(500);
        let log = HookDebugLog::new("test").with_command(&long_input);

        assert_eq!(log.command_summary.len(), SUMMARY_LIMIT + 3);
        assert!(log.command_summary.ends_with("..."));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let long_input = "é".repeat(300);
        let log = HookDebugLog::new("test").with_command(&long_input);
        assert_eq!(log.command_summary.chars().count(), SUMMARY_LIMIT + 3);
    }
}
