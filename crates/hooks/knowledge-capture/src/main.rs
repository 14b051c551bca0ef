//! PostToolUse (Bash) hook: capture LEARNED comments into the knowledge log.
//!
//! Detects `bd comment {ID} "LEARNED [tags]: ..."` and appends an entry to
//! `.beads/memory/knowledge.jsonl` for future recall. Each domain tag is
//! mirrored onto the bead as a `learned:{tag}` label. Produces no output.

use hook_common::prelude::*;
use hook_common::{subprocess, HookDebugLog};
use hook_knowledge::{KnowledgeStorage, LearnedComment, RotationOutcome};
use std::path::Path;
use std::time::Duration;

const HOOK_NAME: &str = "knowledge-capture";

const LABEL_TIMEOUT: Duration = Duration::from_secs(5);

fn main() {
    run_hook(HOOK_NAME, |input| {
        capture(input, &config::project_root())?;
        Ok(None)
    });
}

/// Record a LEARNED comment. Returns the parsed comment when one was stored.
fn capture(input: &HookInput, root: &Path) -> Result<Option<LearnedComment>> {
    let Some(learned) = LearnedComment::parse(input.command()) else {
        return Ok(None);
    };

    let storage = KnowledgeStorage::in_project(root)?;
    let rotation = storage
        .append_and_rotate(&learned.to_entry())
        .with_context(|| format!("Failed to record LEARNED for {}", learned.bead))?;

    label_bead(&learned, root);

    match rotation {
        Ok(RotationOutcome::Rotated { archived, kept }) => {
            let _ = rotation_log(input.command(), archived, kept).write();
        }
        Ok(RotationOutcome::NotNeeded) => {}
        Err(e) => log_decision(HOOK_NAME, input.command(), "rotate-failed", &e.to_string()),
    }

    Ok(Some(learned))
}

fn rotation_log(command: &str, archived: usize, kept: usize) -> HookDebugLog {
    HookDebugLog::new(HOOK_NAME)
        .with_command(command)
        .with_decision("rotate", "knowledge log over threshold")
        .with_context(&format!("archived {} entries, kept {}", archived, kept))
}

/// Tag the bead with `learned:{domain}` labels for native bd search.
fn label_bead(learned: &LearnedComment, root: &Path) {
    for tag in learned.domain_tags() {
        let label = format!("learned:{}", tag);
        if let Err(e) = subprocess::bd(&["label", "add", &learned.bead, &label], root, LABEL_TIMEOUT) {
            log_decision(HOOK_NAME, &label, "label-skipped", &e.to_string());
        }
    }
}
