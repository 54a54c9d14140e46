//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use issue_graph::domain::Issue;
use serde_json::{Value, json};
use std::path::Path;
use std::process::{Command, Output};

/// Embedded reference as the tracker returns it inside sub-tasks and links
pub fn reference(key: &str, status: &str) -> Value {
    json!({
        "key": key,
        "fields": {
            "summary": format!("Summary of {key}"),
            "status": {"name": status, "statusCategory": {"name": "To Do"}}
        }
    })
}

/// A link whose other end is `key`, seen from the issue carrying it
pub fn outward_link(type_name: &str, outward: &str, inward: &str, key: &str) -> Value {
    json!({
        "type": {"name": type_name, "inward": inward, "outward": outward},
        "outwardIssue": reference(key, "Open")
    })
}

/// A link pointing back at the issue carrying it
pub fn inward_link(type_name: &str, outward: &str, inward: &str, key: &str) -> Value {
    json!({
        "type": {"name": type_name, "inward": inward, "outward": outward},
        "inwardIssue": reference(key, "Open")
    })
}

/// "Blocks" link from the carrying issue to `key`
pub fn blocks(key: &str) -> Value {
    outward_link("Blocks", "blocks", "is blocked by", key)
}

/// "Relates" link from the carrying issue to `key`
pub fn relates(key: &str) -> Value {
    outward_link("Relates", "relates to", "relates to", key)
}

/// Builder for issue records in tracker format
pub struct IssueBuilder {
    value: Value,
}

impl IssueBuilder {
    pub fn new(key: &str) -> Self {
        Self {
            value: json!({
                "key": key,
                "fields": {
                    "summary": format!("Summary of {key}"),
                    "status": {"name": "Open", "statusCategory": {"name": "To Do"}},
                    "issuetype": {"name": "Task"},
                    "subtasks": [],
                    "issuelinks": []
                }
            }),
        }
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.value["fields"]["summary"] = json!(summary);
        self
    }

    pub fn status(mut self, name: &str, category: &str) -> Self {
        self.value["fields"]["status"] = json!({"name": name, "statusCategory": {"name": category}});
        self
    }

    pub fn epic(mut self) -> Self {
        self.value["fields"]["issuetype"] = json!({"name": "Epic"});
        self
    }

    pub fn subtask(mut self, key: &str) -> Self {
        self.fields_array("subtasks").push(reference(key, "Open"));
        self
    }

    pub fn link(mut self, link: Value) -> Self {
        self.fields_array("issuelinks").push(link);
        self
    }

    pub fn json(self) -> Value {
        self.value
    }

    pub fn build(self) -> Issue {
        serde_json::from_value(self.value).expect("Failed to build issue")
    }

    fn fields_array(&mut self, name: &str) -> &mut Vec<Value> {
        self.value["fields"][name]
            .as_array_mut()
            .expect("Field is an array")
    }
}

/// Run the issue-graph binary in the specified directory
pub fn run_issue_graph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_issue-graph"))
        .args(args)
        .current_dir(dir)
        .env_remove("JIRA_USER")
        .env_remove("JIRA_PASSWORD")
        .output()
        .expect("Failed to execute issue-graph binary")
}
