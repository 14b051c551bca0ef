//! PostToolUse (Bash) hook: keep probes and findings on the record.
//!
//! - A `bd comment ... FINDING` that touches a shared contract gets a
//!   design-doc drift reminder.
//! - A probe-like command (tests, builds, HTTP/RPC calls) with real output
//!   gets a reminder to record a FINDING.

use hook_common::prelude::*;
use regex::Regex;
use std::sync::LazyLock;

const HOOK_NAME: &str = "record-enforcement";

const CONTRACT_DRIFT_MESSAGE: &str = "\
This FINDING may affect a shared contract.
Check: does this contradict anything in .designs/ or shared/.designs/?
  - Minor drift (clarification) → update design-doc in same commit
  - Breaking change → update contract in shared/ (if submodule exists),
    record LEARNED, and remind developer to notify other modules";

const PROBE_MESSAGE: &str = "\
Probe detected. Remember: every probe must leave a FINDING.
Record the result:
  bd comment {ID} \"FINDING [tag]: {exact observation — field names, error codes, behavior}\"";

// Tags that typically involve shared contracts
const CONTRACT_TAGS: &[&str] = &["grpc", "rest", "kafka", "protobuf", "schema", "contract", "api"];

// Output longer than this counts as a result even without keywords
const RESULT_LENGTH_THRESHOLD: usize = 100;

static FINDING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)FINDING").unwrap());
static FIRST_TAG_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());
static CONTRACT_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)field|type|endpoint|schema|response|request|parameter|return|enum|breaking")
        .unwrap()
});
static PROBE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)dotnet\s+(test|run|build)",
        r"(?i)cargo\s+(test|run|build)",
        r"(?i)npm\s+(test|run)",
        r"(?i)node\s+.*test",
        r"(?i)pytest|jest|mocha|xunit",
        r"(?i)curl\s+",
        r"(?i)grpcurl",
        r"(?i)make\s+(test|build|run)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});
static RESULT_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)error|fail|pass|success|assert|exception").unwrap());

const RULE_TABLE: &[Rule] = &[
    Rule::advise("finding-contract-drift", is_contract_finding, CONTRACT_DRIFT_MESSAGE),
    Rule::silent("finding-other", is_finding_comment),
    Rule::silent("tracker-bookkeeping", is_tracker_bookkeeping),
    Rule::advise("probe-result", is_probe_with_results, PROBE_MESSAGE),
];

const RULES: RuleSet = RuleSet::new(RULE_TABLE);

fn main() {
    run_hook(HOOK_NAME, |input| Ok(RULES.advisory(input).map(String::from)));
}

fn is_finding_comment(input: &HookInput) -> bool {
    let command = input.command();
    command.contains("bd comment") && FINDING.is_match(command)
}

/// A FINDING whose tags or wording suggest a shared contract.
fn is_contract_finding(input: &HookInput) -> bool {
    if !is_finding_comment(input) {
        return false;
    }
    let command = input.command();
    has_contract_tag(command) || CONTRACT_KEYWORDS.is_match(command)
}

fn has_contract_tag(command: &str) -> bool {
    FIRST_TAG_LIST
        .captures(command)
        .and_then(|caps| caps.get(1))
        .is_some_and(|list| {
            list.as_str()
                .split(',')
                .map(|t| t.trim().to_lowercase())
                .any(|t| CONTRACT_TAGS.contains(&t.as_str()))
        })
}

/// Task bookkeeping is not a probe.
fn is_tracker_bookkeeping(input: &HookInput) -> bool {
    let command = input.command();
    command.contains("bd create") || command.contains("bd update")
}

fn is_probe_with_results(input: &HookInput) -> bool {
    is_probe(input.command()) && has_results(&input.combined_output())
}

fn is_probe(command: &str) -> bool {
    PROBE_PATTERNS.iter().any(|p| p.is_match(command))
}

fn has_results(output: &str) -> bool {
    output.chars().count() > RESULT_LENGTH_THRESHOLD || RESULT_KEYWORDS.is_match(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(command: &str, stdout: &str) -> HookInput {
        let json = serde_json::json!({
            "tool_name": "Bash",
            "tool_input": { "command": command },
            "tool_output": { "stdout": stdout, "stderr": "" },
        });
        HookInput::parse(&json.to_string()).unwrap()
    }

    fn decided_by(command: &str, stdout: &str) -> Option<&'static str> {
        RULES.first_match(&event(command, stdout)).map(|rule| rule.name)
    }

    #[test]
    fn test_contract_tag_finding() {
        let input = event(r#"bd comment p-1 "FINDING [gRPC, auth]: deadline ignored""#, "");
        assert_eq!(RULES.advisory(&input), Some(CONTRACT_DRIFT_MESSAGE));
    }

    #[test]
    fn test_contract_keyword_finding() {
        let input = event(r#"bd comment p-1 "finding: the id Field is now optional""#, "");
        assert_eq!(RULES.advisory(&input), Some(CONTRACT_DRIFT_MESSAGE));
    }

    #[test]
    fn test_plain_finding_is_silent_even_after_probe() {
        let command = r#"bd comment p-1 "FINDING [perf]: cargo test takes 4s""#;
        assert_eq!(decided_by(command, &"x".repeat(500)), Some("finding-other"));
        assert_eq!(RULES.advisory(&event(command, "FAILED")), None);
    }

    #[test]
    fn test_bookkeeping_is_silent() {
        assert_eq!(
            decided_by(r#"bd create "curl the health endpoint""#, "error: x"),
            Some("tracker-bookkeeping")
        );
        assert_eq!(decided_by("bd update p-1 --notes 'cargo test ok'", "passed"), Some("tracker-bookkeeping"));
    }

    #[test]
    fn test_probe_with_keyword_output() {
        assert_eq!(RULES.advisory(&event("cargo test -p api", "test result: ok. 3 passed")), Some(PROBE_MESSAGE));
        assert_eq!(RULES.advisory(&event("curl -s localhost:8080/health", "Success")), Some(PROBE_MESSAGE));
        assert_eq!(RULES.advisory(&event("uv run pytest -q", "1 failed")), Some(PROBE_MESSAGE));
    }

    #[test]
    fn test_probe_with_long_output() {
        let output = "x".repeat(RESULT_LENGTH_THRESHOLD + 1);
        assert_eq!(RULES.advisory(&event("make build", &output)), Some(PROBE_MESSAGE));
    }

    #[test]
    fn test_probe_with_trivial_output_is_silent() {
        assert_eq!(RULES.advisory(&event("cargo build", "")), None);
        assert_eq!(RULES.advisory(&event("grpcurl list", "svc.Api")), None);
    }

    #[test]
    fn test_non_probe_is_silent() {
        assert_eq!(RULES.advisory(&event("ls -la", &"error ".repeat(50))), None);
        assert_eq!(RULES.advisory(&event("git status", "nothing to commit")), None);
    }

    #[test]
    fn test_has_contract_tag_uses_first_bracket_group() {
        assert!(has_contract_tag("FINDING [rest]: x [perf]"));
        assert!(!has_contract_tag("FINDING [perf]: x [rest]"));
        assert!(!has_contract_tag("FINDING: no tags"));
    }
}
