//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for issue-graph using
//! clap's derive API. Flags are grouped by concern in [`args`].
//!
//! # Example
//!
//! ```bash
//! issue-graph --jira https://jira.example.com -u alice PROJ-1107 --local
//! issue-graph --jql 'project = PROJ AND sprint in openSprints()' -x "relates to"
//! issue-graph --snapshot issues.json PROJ-1 --dot --dot-format svg -f graph.svg
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

// Re-export argument groups
pub use args::{ConnectionArgs, FilterArgs, OutputArgs};

// Re-export types
pub use types::DirectionArg;

// Re-export execution helpers
pub use execute::{PASSWORD_ENV, USER_ENV, resolve_roots};

// Re-export validators for external use
pub use validators::{validate_issue_key, validate_summary_length};

/// Issue Graph - render the dependency graph of Jira issues
///
/// Walks sub-tasks, epic children and issue links from the given issues and
/// renders the result with Graphviz.
#[derive(Parser, Debug)]
#[command(name = "issue-graph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Issue keys to start from (e.g. PROJ-1107 PROJ-1391)
    #[arg(value_parser = validate_issue_key, required_unless_present = "jql")]
    pub issues: Vec<String>,

    /// JQL search whose results are added to the starting issues
    #[arg(long)]
    pub jql: Option<String>,

    /// Settings file (default: .issue-graph.yaml in this or a parent directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read issues from a JSON snapshot instead of the tracker
    #[arg(long, conflicts_with_all = ["jira_url", "user", "password", "cookie", "no_auth"])]
    pub snapshot: Option<PathBuf>,

    /// Tracker connection
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Graph filters
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output
    #[command(flatten)]
    pub output: OutputArgs,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        execute::execute(self).await
    }
}
