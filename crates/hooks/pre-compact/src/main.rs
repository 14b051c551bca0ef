//! PreCompact hook: run the compound procedure before context compression.
//!
//! Unconditional. The event payload is not inspected.

use hook_common::prelude::*;

const COMPOUND_REMINDER: &str = "\
IMPORTANT: Context is about to be compacted.

Run the compound procedure before compaction:
1. Extract new gotchas/patterns → .context/patterns.md
2. Record FINDINGs and LEARNEDs in beads (bd comment)
3. Update beads task state (bd update/close/create)
4. Update .designs/ if any FINDINGs affect contracts

Load skill @skills/compound for the full procedure.
Only compact after all steps are complete.";

fn main() {
    // Drain the event; its content does not matter here.
    let _ = HookInput::from_stdin();
    if let Err(e) = HookOutput::message(COMPOUND_REMINDER).write_stdout() {
        log_decision("pre-compact", "", "error", &e.to_string());
    }
}
