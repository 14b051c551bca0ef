//! `.claude/settings.json` hook registration.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub fn settings_path(root: &Path) -> PathBuf {
    root.join(".claude").join("settings.json")
}

/// How the existing settings file was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSource {
    Created,
    Merged,
    /// Existing file was not a JSON object and has been replaced
    Replaced,
}

/// Replace the `hooks` field of `settings` with the one from `hooks_config`.
pub fn merge_hooks(mut settings: Map<String, Value>, hooks_config: &Value) -> Map<String, Value> {
    let hooks = hooks_config.get("hooks").cloned().unwrap_or(Value::Null);
    settings.insert("hooks".to_string(), hooks);
    settings
}

/// Step 4: write the bundled hook registration into the project settings,
/// preserving every other top-level field.
pub fn configure_hooks(root: &Path, hooks_config: &str) -> Result<SettingsSource> {
    let path = settings_path(root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let (existing, source) = match fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str::<Map<String, Value>>(&raw) {
            Ok(map) => (map, SettingsSource::Merged),
            Err(_) => (Map::new(), SettingsSource::Replaced),
        },
        Err(_) => (Map::new(), SettingsSource::Created),
    };

    let hooks_config: Value =
        serde_json::from_str(hooks_config).context("bundled hooks configuration is not valid JSON")?;
    let merged = merge_hooks(existing, &hooks_config);

    let mut out = serde_json::to_string_pretty(&Value::Object(merged))?;
    out.push('\n');
    fs::write(&path, out).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(source)
}
