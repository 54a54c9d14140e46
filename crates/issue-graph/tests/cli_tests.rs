//! Integration tests for the issue-graph CLI.
//!
//! These tests run the binary against snapshot files so no tracker is needed.

use rstest::{fixture, rstest};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{IssueBuilder, blocks, relates, run_issue_graph_in_dir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides a temporary directory containing `snapshot.json`
#[fixture]
fn snapshot_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let snapshot = json!({
        "issues": [
            IssueBuilder::new("PROJ-1")
                .summary("Ship the release")
                .subtask("PROJ-2")
                .link(blocks("PROJ-3"))
                .link(relates("OTHER-9"))
                .json(),
            IssueBuilder::new("PROJ-2").status("In Review", "In Progress").json(),
            IssueBuilder::new("PROJ-3").status("Closed", "Done").json(),
            IssueBuilder::new("OTHER-9").json()
        ],
        "queries": {
            "project = PROJ AND status = Open": ["PROJ-3"]
        }
    });
    fs::write(
        temp.path().join("snapshot.json"),
        serde_json::to_string_pretty(&snapshot).unwrap(),
    )
    .expect("Failed to write snapshot");
    temp
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[rstest]
fn test_cli_help(temp_dir: TempDir) {
    let output = run_issue_graph_in_dir(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("issue-graph"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--exclude-link"));
}

#[rstest]
fn test_cli_version(temp_dir: TempDir) {
    let output = run_issue_graph_in_dir(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[rstest]
fn test_cli_rejects_invalid_key(temp_dir: TempDir) {
    let output = run_issue_graph_in_dir(temp_dir.path(), &["not a key", "--local"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid issue key"));
}

#[rstest]
fn test_cli_requires_tracker_url(temp_dir: TempDir) {
    let output = run_issue_graph_in_dir(temp_dir.path(), &["PROJ-1", "--local", "-N"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No tracker URL"));
}

// ============================================================================
// Snapshot Rendering Tests
// ============================================================================

#[rstest]
fn test_local_output_from_snapshot(snapshot_dir: TempDir) {
    let output = run_issue_graph_in_dir(
        snapshot_dir.path(),
        &["PROJ-1", "--snapshot", "snapshot.json", "--local"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("digraph{\nnode [shape=box];\n\n"));
    assert!(text.ends_with("\n}\n"));
    assert!(text.contains(
        r#""PROJ-1\n(Ship the release)" [href="memory://browse/PROJ-1", fillcolor="white", style=filled]"#
    ));
    assert!(text.contains(r#"fillcolor="yellow""#));
    assert!(text.contains(r#"fillcolor="green""#));
    assert!(text.contains(r#"[color=blue][label="subtask"]"#));
    assert!(text.contains(r#"[label="blocks",color="red"]"#));
    // Other projects are not followed by default
    assert!(!text.contains("OTHER-9"));
}

#[rstest]
fn test_cross_projects_flag(snapshot_dir: TempDir) {
    let output = run_issue_graph_in_dir(
        snapshot_dir.path(),
        &[
            "PROJ-1",
            "--snapshot",
            "snapshot.json",
            "--local",
            "--cross-projects",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(r#""OTHER-9\n(Summary of OTHER-9)" [href="#));
}

#[rstest]
fn test_exclude_link_and_ignore_closed(snapshot_dir: TempDir) {
    let output = run_issue_graph_in_dir(
        snapshot_dir.path(),
        &[
            "PROJ-1",
            "--snapshot",
            "snapshot.json",
            "--local",
            "-x",
            "blocks",
            "--ignore-closed",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(!text.contains("blocks"));
    assert!(!text.contains("PROJ-3"));
}

#[rstest]
fn test_json_output(snapshot_dir: TempDir) {
    let output = run_issue_graph_in_dir(
        snapshot_dir.path(),
        &["PROJ-1", "--snapshot", "snapshot.json", "--json"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["node_shape"], "box");

    let statements = value["statements"].as_array().unwrap();
    let nodes = statements
        .iter()
        .filter(|statement| statement["type"] == "node")
        .count();
    assert_eq!(nodes, 3);
    assert_eq!(statements[0]["label"]["key"], "PROJ-1");
}

#[rstest]
fn test_jql_adds_roots(snapshot_dir: TempDir) {
    let output = run_issue_graph_in_dir(
        snapshot_dir.path(),
        &[
            "--jql",
            "project = PROJ AND status = Open",
            "--snapshot",
            "snapshot.json",
            "--local",
            "-d",
            "outward",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("PROJ-3"));
    assert!(!text.contains("PROJ-1"));
}

#[rstest]
fn test_settings_file_is_discovered(snapshot_dir: TempDir) {
    fs::write(
        snapshot_dir.path().join(".issue-graph.yaml"),
        "node-shape: ellipse\nsummary-length: 4\nexclude-links:\n  - blocks\n",
    )
    .unwrap();

    let output = run_issue_graph_in_dir(
        snapshot_dir.path(),
        &["PROJ-1", "--snapshot", "snapshot.json", "--local"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("digraph{\nnode [shape=ellipse];"));
    assert!(text.contains(r#""PROJ-1\n(Ship...)""#));
    assert!(!text.contains(r#"label="blocks""#));
}

#[rstest]
fn test_invalid_settings_file_fails(snapshot_dir: TempDir) {
    fs::write(
        snapshot_dir.path().join("settings.yaml"),
        "no-such-key: true\n",
    )
    .unwrap();

    let output = run_issue_graph_in_dir(
        snapshot_dir.path(),
        &[
            "PROJ-1",
            "--snapshot",
            "snapshot.json",
            "--config",
            "settings.yaml",
            "--local",
        ],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Configuration error"));
}

#[rstest]
fn test_missing_issue_fails(snapshot_dir: TempDir) {
    let output = run_issue_graph_in_dir(
        snapshot_dir.path(),
        &["PROJ-404", "--snapshot", "snapshot.json", "--local"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Issue not found: PROJ-404"));
    assert!(stdout(&output).is_empty());
}
