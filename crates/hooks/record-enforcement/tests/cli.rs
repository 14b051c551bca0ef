use assert_cmd::Command;
use predicates::prelude::*;

fn run(event: serde_json::Value) -> assert_cmd::assert::Assert {
    Command::cargo_bin("record-enforcement")
        .unwrap()
        .write_stdin(event.to_string())
        .assert()
        .success()
}

#[test]
fn probe_with_output_reminds_to_record_finding() {
    run(serde_json::json!({
        "tool_name": "Bash",
        "tool_input": { "command": "dotnet test" },
        "tool_output": { "stdout": "", "stderr": "Assert.Equal() Failure" },
    }))
    .stdout(predicate::str::contains("Probe detected."));
}

#[test]
fn contract_finding_mentions_design_docs() {
    run(serde_json::json!({
        "tool_name": "Bash",
        "tool_input": { "command": "bd comment p-4 \"FINDING [kafka]: partition key is user id\"" },
        "tool_output": { "stdout": "Comment added" },
    }))
    .stdout(predicate::str::contains("shared/.designs/"));
}

#[test]
fn probe_without_output_is_silent() {
    run(serde_json::json!({
        "tool_name": "Bash",
        "tool_input": { "command": "npm test" },
    }))
    .stdout(predicate::str::is_empty());
}

#[test]
fn garbage_is_silent() {
    Command::cargo_bin("record-enforcement")
        .unwrap()
        .write_stdin("\u{0}\u{1}")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
