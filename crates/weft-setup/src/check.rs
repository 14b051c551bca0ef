//! `--check`: environment diagnostics for a project.

use crate::scaffold::HOOKS_DEST_DIR;
use crate::settings::settings_path;
use crate::tracker::{self, BD_INSTALL_HINT, DOLT_INSTALL_HINT};
use hook_common::config;
use hook_common::net::DOLT_PORT;
use std::fmt;
use std::fs;
use std::path::Path;

/// One diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckLine {
    pub ok: bool,
    pub text: String,
}

impl CheckLine {
    pub fn pass(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            text: text.into(),
        }
    }

    pub fn fail(text: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: text.into(),
        }
    }
}

impl fmt::Display for CheckLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.ok { "✓" } else { "✗" };
        write!(f, "  [{}] {}", mark, self.text)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub lines: Vec<CheckLine>,
}

impl CheckReport {
    /// True only when every line passed.
    pub fn all_passed(&self) -> bool {
        self.lines.iter().all(|line| line.ok)
    }

    pub fn push(&mut self, line: CheckLine) {
        self.lines.push(line);
    }
}

/// Checks that depend on installed tools and the local dolt server.
pub fn environment_checks(report: &mut CheckReport) {
    report.push(CheckLine::pass(format!(
        "weft-setup {}",
        env!("CARGO_PKG_VERSION")
    )));

    report.push(match tracker::bd_version() {
        Some(version) => CheckLine::pass(format!("bd {}", version)),
        None => CheckLine::fail(format!("bd not found — install: {}", BD_INSTALL_HINT)),
    });

    report.push(match tracker::dolt_version() {
        Some(version) => CheckLine::pass(format!("dolt {}", version)),
        None => CheckLine::fail(format!("dolt not found — install: {}", DOLT_INSTALL_HINT)),
    });

    report.push(if tracker::dolt_server_running() {
        CheckLine::pass(format!("dolt sql-server running (port {})", DOLT_PORT))
    } else {
        CheckLine::fail(format!("dolt sql-server not reachable on port {}", DOLT_PORT))
    });
}

/// Checks on the files setup writes into the project.
pub fn project_checks(root: &Path, report: &mut CheckReport) {
    report.push(if config::beads_dir(root).exists() {
        CheckLine::pass(".beads/ initialized")
    } else {
        CheckLine::fail(".beads/ not found — run: bd init")
    });

    report.push(settings_check(root));

    let hooks_dir = root.join(HOOKS_DEST_DIR);
    report.push(match fs::read_dir(&hooks_dir) {
        Ok(entries) => {
            let count = entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .count();
            CheckLine::pass(format!("{}/ ({} hooks)", HOOKS_DEST_DIR, count))
        }
        Err(_) => CheckLine::fail(format!("{}/ not found — run setup", HOOKS_DEST_DIR)),
    });

    report.push(if root.join("CLAUDE.md").exists() {
        CheckLine::pass("CLAUDE.md exists")
    } else {
        CheckLine::fail("CLAUDE.md not found — run setup")
    });
}

fn settings_check(root: &Path) -> CheckLine {
    let Ok(raw) = fs::read_to_string(settings_path(root)) else {
        return CheckLine::fail(".claude/settings.json not found — run setup first");
    };
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(settings) if settings.get("hooks").is_some_and(|h| !h.is_null()) => {
            CheckLine::pass(".claude/settings.json has hooks configured")
        }
        Ok(_) => CheckLine::fail(".claude/settings.json exists but has no hooks — re-run setup"),
        Err(_) => CheckLine::fail(".claude/settings.json is not valid JSON — re-run setup"),
    }
}

/// Run every check and print the report. Returns whether all passed.
pub fn run(root: &Path) -> bool {
    println!("Rolling Weft — environment check");
    println!("  Project: {}", root.display());
    println!();

    let mut report = CheckReport::default();
    environment_checks(&mut report);
    project_checks(root, &mut report);
    for line in &report.lines {
        println!("{}", line);
    }

    println!();
    let ok = report.all_passed();
    if ok {
        println!("All checks passed.");
    } else {
        println!("Some checks failed — see above.");
    }
    ok
}
