use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Run the hook with no tracker CLI on PATH, so labelling fails fast.
fn run_in(project: &TempDir, command: &str) -> assert_cmd::assert::Assert {
    let event = serde_json::json!({
        "tool_name": "Bash",
        "tool_input": { "command": command },
        "tool_output": { "stdout": "Comment added", "stderr": "" },
    });
    Command::cargo_bin("knowledge-capture")
        .unwrap()
        .env("CLAUDE_PROJECT_ROOT", project.path())
        .env("PATH", "")
        .env_remove("CLAUDE_HOOK_DEBUG")
        .write_stdin(event.to_string())
        .assert()
}

fn knowledge_lines(project: &TempDir) -> Vec<serde_json::Value> {
    let path = project.path().join(".beads/memory/knowledge.jsonl");
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn tagged_learned_comment_is_recorded() {
    let project = TempDir::new().unwrap();
    run_in(
        &project,
        r#"bd comment proj-12 "LEARNED [A, b]: retries need jittered backoff""#,
    )
    .success()
    .stdout(predicate::str::is_empty());

    let lines = knowledge_lines(&project);
    assert_eq!(lines.len(), 1);
    let entry = &lines[0];
    assert_eq!(entry["key"], "learned-retries-need-jittered-backoff");
    assert_eq!(entry["type"], "learned");
    assert_eq!(entry["content"], "retries need jittered backoff");
    assert_eq!(entry["tags"], serde_json::json!(["a", "b", "learned"]));
    assert_eq!(entry["bead"], "proj-12");
    assert!(entry["ts"].as_i64().unwrap() > 0);
}

#[test]
fn repeated_captures_append() {
    let project = TempDir::new().unwrap();
    run_in(&project, r#"bd comment p-1 "LEARNED: one""#).success();
    run_in(&project, r#"bd comment p-2 "LEARNED: two""#).success();

    let lines = knowledge_lines(&project);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["content"], "one");
    assert_eq!(lines[1]["bead"], "p-2");
}

#[test]
fn rotation_moves_oldest_half_to_archive() {
    let project = TempDir::new().unwrap();
    let memory = project.path().join(".beads/memory");
    fs::create_dir_all(&memory).unwrap();
    let prior: String = (0..1000).map(|i| format!("{{\"n\":{i}}}\n")).collect();
    fs::write(memory.join("knowledge.jsonl"), &prior).unwrap();

    run_in(&project, r#"bd comment p-9 "LEARNED: rotation works""#).success();

    let archive = fs::read_to_string(memory.join("knowledge.archive.jsonl")).unwrap();
    let live = fs::read_to_string(memory.join("knowledge.jsonl")).unwrap();
    assert_eq!(archive.lines().count(), 500);
    assert_eq!(live.lines().count(), 501);
    assert!(archive.starts_with("{\"n\":0}\n"));
    assert!(live.starts_with("{\"n\":500}\n"));
    assert!(live.lines().last().unwrap().contains("rotation works"));
}

#[test]
fn unrelated_and_invalid_input_leave_no_trace() {
    let project = TempDir::new().unwrap();
    run_in(&project, "ls -la").success().stdout(predicate::str::is_empty());

    Command::cargo_bin("knowledge-capture")
        .unwrap()
        .env("CLAUDE_PROJECT_ROOT", project.path())
        .write_stdin("garbage")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!project.path().join(".beads").exists());
}
