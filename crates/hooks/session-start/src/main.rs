//! SessionStart hook: load project context into the session.
//!
//! 1. Runs `bd prime` if beads is initialized.
//! 2. Reminds to check `.context/patterns.md` if it has content.
//! 3. Suggests context recovery when resuming work on a bead.
//! 4. Lists `shared/` files changed since the last session.

use hook_common::prelude::*;
use hook_common::{dispatch, subprocess};
use std::fs;
use std::path::Path;
use std::time::Duration;

const HOOK_NAME: &str = "session-start";

const PRIME_TIMEOUT: Duration = Duration::from_secs(8);
const GIT_TIMEOUT: Duration = Duration::from_secs(5);

// patterns.md at or below this size is still the empty template
const PATTERNS_MIN_BYTES: u64 = 200;

const SECTION_SEPARATOR: &str = "\n\n---\n\n";

const PATTERNS_REMINDER: &str =
    "Check .context/patterns.md for domain-specific gotchas before starting work.";

const RECOVERY_HINT: &str = "\
If resuming work on a specific task, run `bd show {ID}` to recover context.
Check for existing FINDING/ASSUMPTION records before starting new probes.";

fn main() {
    // SessionStart payloads carry nothing this hook needs.
    let input = HookInput::from_stdin().unwrap_or_default();
    let root = config::project_root();
    dispatch(
        HOOK_NAME,
        &input,
        |_| Ok(session_context(&root)),
        &mut std::io::stdout().lock(),
    );
}

fn session_context(root: &Path) -> Option<String> {
    let beads_initialized = config::beads_dir(root).is_dir();
    let mut parts = Vec::new();

    if beads_initialized {
        if let Some(prime) = bd_prime(root) {
            parts.push(prime);
        }
    }

    if patterns_has_content(root) {
        parts.push(PATTERNS_REMINDER.to_string());
    }

    if beads_initialized {
        parts.push(RECOVERY_HINT.to_string());
    }

    if config::shared_dir(root).is_dir() {
        match shared_changes(root) {
            Ok(Some(changes)) => parts.push(changes),
            Ok(None) => {}
            Err(e) => log_decision(HOOK_NAME, "git", "shared-skipped", &format!("{:#}", e)),
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(SECTION_SEPARATOR))
    }
}

/// Output of `bd prime`, if bd is installed and has something to say.
fn bd_prime(root: &Path) -> Option<String> {
    match subprocess::bd(&["prime"], root, PRIME_TIMEOUT) {
        Ok(result) if result.success => {
            let prime = result.stdout.trim();
            (!prime.is_empty()).then(|| prime.to_string())
        }
        Ok(_) => None,
        Err(e) => {
            log_decision(HOOK_NAME, "bd prime", "prime-skipped", &e.to_string());
            None
        }
    }
}

fn patterns_has_content(root: &Path) -> bool {
    fs::metadata(config::patterns_path(root)).is_ok_and(|meta| meta.len() > PATTERNS_MIN_BYTES)
}

/// Report `shared/` changes since the revision in the marker file, then
/// move the marker to HEAD. The report survives a failed marker write.
fn shared_changes(root: &Path) -> Result<Option<String>> {
    let head = git_stdout(root, &["rev-parse", "HEAD"])?;
    let marker = MarkerFile::new(config::shared_marker_path(root));

    let mut report = None;
    if let Some(from) = marker.read().filter(|from| *from != head) {
        let range = format!("{}..HEAD", from);
        let diff = git_stdout(root, &["diff", &range, "--name-only", "--", "shared/"])?;
        if !diff.is_empty() {
            let files: Vec<String> = diff.lines().map(|f| format!("  {}", f)).collect();
            report = Some(format!(
                "shared-contracts changed since last session:\n{}\n\
                 Check if these changes affect your module's .designs/ or code.",
                files.join("\n")
            ));
        }
    }

    if let Err(e) = marker.write(&head) {
        log_decision(HOOK_NAME, "git", "marker-not-saved", &format!("{:#}", e));
    }
    Ok(report)
}

fn git_stdout(root: &Path, args: &[&str]) -> Result<String> {
    let result = subprocess::git(args, root, GIT_TIMEOUT)?;
    if !result.success {
        anyhow::bail!("git {} failed: {}", args.join(" "), result.stderr.trim());
    }
    Ok(result.stdout.trim().to_string())
}
