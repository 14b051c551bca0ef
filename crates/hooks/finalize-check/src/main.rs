//! PreToolUse (Bash) hook: finalize checklist before `bd close`.
//!
//! Fires when the command mentions both the tracker and "close"
//! (case-insensitive) and reminds the assistant to finish the bead properly.

use hook_common::prelude::*;

const HOOK_NAME: &str = "finalize-check";

const CLOSE_CHECKLIST: &str = "\
About to close a bead. Finalize checklist:

1. ASSUMPTIONS: Run `bd show {ID}` and review every ASSUMPTION record.
   Each one: confirmed? contradicted? still unknown?

2. BLOCKING STATUS: Ask the user:
   - Where do we go next?
   - Does the next task BLOCK this one? (prerequisite → bd dep add)
   - Or is this node SUSPENDED? (user returns later)

3. LEARNED: Write LEARNED for any gotchas discovered during this work.

4. DESIGN-DOC DRIFT: Do any FINDINGs reveal design-doc inconsistencies?
   If yes → update .designs/ (minor) or update shared/.designs/ + notify team (breaking).

5. LABELS: Does this bead have labels matching its domain tags?
   Run `bd label list {ID}`. If empty, add labels: `bd label add {ID} {domain}`.
   Labels should mirror the [tags] used in FINDING/LEARNED comments.

6. CONSTITUTION: Did any changes touch architecture (new dependency, threading,
   data model, external API contract)? If yes — read constitution.md and verify
   no rules were violated. Violations require documented justification.

7. SPAWN: Does finalize reveal new work? → bd create with --deps --labels";

const RULE_TABLE: &[Rule] = &[Rule::advise(
    "tracker-close",
    is_tracker_close,
    CLOSE_CHECKLIST,
)];

const RULES: RuleSet = RuleSet::new(RULE_TABLE);

fn main() {
    run_hook(HOOK_NAME, |input| Ok(RULES.advisory(input).map(String::from)));
}

/// Check if the command looks like closing a bead.
fn is_tracker_close(input: &HookInput) -> bool {
    let command = input.command().to_lowercase();
    command.contains("bd") && command.contains("close")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bash(command: &str) -> HookInput {
        HookInput::parse(&format!(
            r#"{{"tool_name":"Bash","tool_input":{{"command":{}}}}}"#,
            serde_json::to_string(command).unwrap()
        ))
        .unwrap()
    }

    #[test]
    fn test_close_commands_advise() {
        assert_eq!(RULES.advisory(&bash("bd close proj-12")), Some(CLOSE_CHECKLIST));
        assert_eq!(RULES.advisory(&bash("BD CLOSE proj-12 --reason done")), Some(CLOSE_CHECKLIST));
    }

    #[test]
    fn test_other_commands_pass() {
        assert_eq!(RULES.advisory(&bash("bd show proj-12")), None);
        assert_eq!(RULES.advisory(&bash("git commit -m 'close window'")), None);
        assert_eq!(RULES.advisory(&bash("")), None);
    }

    #[test]
    fn test_checklist_has_seven_steps() {
        for step in 1..=7 {
            assert!(CLOSE_CHECKLIST.contains(&format!("\n{}. ", step)));
        }
    }
}
