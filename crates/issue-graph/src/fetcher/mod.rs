//! Issue fetching abstraction.
//!
//! The discovery engine only talks to the tracker through the
//! [`IssueFetcher`] trait. Two implementations ship with the crate:
//!
//! - [`JiraClient`]: the REST client used by the command-line tool
//! - [`InMemoryFetcher`]: a map-backed fetcher for offline snapshots and tests
//!
//! # Example
//!
//! ```no_run
//! use issue_graph::config::FilterConfig;
//! use issue_graph::domain::IssueKey;
//! use issue_graph::fetcher::{Auth, JiraClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JiraClient::new("https://jira.example.com", Auth::None, false)?;
//!     let statements = issue_graph::graph::discover(
//!         &client,
//!         &[IssueKey::from("PROJ-1")],
//!         &FilterConfig::default(),
//!     )
//!     .await?;
//!     println!("{} statements", statements.len());
//!     Ok(())
//! }
//! ```

use crate::domain::{Issue, IssueKey};
use crate::error::Result;
use async_trait::async_trait;

pub mod in_memory;
pub mod jira;

pub use in_memory::{InMemoryFetcher, Snapshot};
pub use jira::{Auth, JiraClient};

/// Fields requested for every issue.
pub const ISSUE_FIELDS: &[&str] = &[
    "key",
    "summary",
    "status",
    "description",
    "issuetype",
    "issuelinks",
    "subtasks",
];

/// Source of issue records.
///
/// The discovery engine awaits one call at a time; implementations never
/// see concurrent requests from a single run.
#[async_trait]
pub trait IssueFetcher: Send + Sync {
    /// Fetch one issue with the fields in [`ISSUE_FIELDS`].
    ///
    /// # Errors
    ///
    /// Fails when the issue cannot be retrieved or decoded. The failure aborts
    /// the discovery run.
    async fn get_issue(&self, key: &IssueKey) -> Result<Issue>;

    /// Run a search query and return the matching issues.
    async fn search(&self, query: &str) -> Result<Vec<Issue>>;

    /// Run a search query and return only the keys of matching issues.
    async fn search_keys(&self, query: &str) -> Result<Vec<IssueKey>>;

    /// URL of the issue in the tracker's web interface.
    fn browse_url(&self, key: &IssueKey) -> String;
}

/// Query selecting every issue that belongs to `epic`.
pub fn epic_children_query(epic: &IssueKey) -> String {
    format!("\"Epic Link\" = \"{epic}\"")
}
