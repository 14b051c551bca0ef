//! PreToolUse (Bash) hook: remind to update beads before `git commit`.

use hook_common::prelude::*;

const HOOK_NAME: &str = "pre-commit";

const COMMIT_CHECKLIST: &str = "\
About to commit. Checklist:
- Did you update beads task state? (bd update {ID} --notes \"...\" or bd close {ID})
- Were any new gotchas found? → add LEARNED to beads + .context/patterns.md
- Do any FINDINGs affect .designs/ contracts? → update or flag as breaking";

const RULE_TABLE: &[Rule] = &[Rule::advise("git-commit", is_git_commit, COMMIT_CHECKLIST)];

const RULES: RuleSet = RuleSet::new(RULE_TABLE);

fn main() {
    run_hook(HOOK_NAME, |input| Ok(RULES.advisory(input).map(String::from)));
}

fn is_git_commit(input: &HookInput) -> bool {
    input.command().to_lowercase().contains("git commit")
}
