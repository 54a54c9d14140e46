//! Map-backed issue fetcher.
//!
//! Serves issues from memory, either built up programmatically or loaded
//! from a JSON snapshot file:
//!
//! ```json
//! {
//!   "issues": [ { "key": "PROJ-1", "fields": { ... } } ],
//!   "queries": { "\"Epic Link\" = \"PROJ-1\"": ["PROJ-5"] }
//! }
//! ```
//!
//! Every `get_issue` call is counted per key so callers can verify that a
//! discovery run fetched each issue at most once.

use super::IssueFetcher;
use crate::domain::{Issue, IssueKey};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tokio::fs;

/// Serialized form of an [`InMemoryFetcher`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Issue records in tracker format
    #[serde(default)]
    pub issues: Vec<Issue>,

    /// Query text mapped to the keys it matches
    #[serde(default)]
    pub queries: HashMap<String, Vec<IssueKey>>,
}

/// Issue fetcher serving records from memory.
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    issues: HashMap<IssueKey, Issue>,
    queries: HashMap<String, Vec<IssueKey>>,
    fetches: Mutex<HashMap<IssueKey, usize>>,
}

impl InMemoryFetcher {
    /// Create an empty fetcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fetcher from a snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            issues: snapshot
                .issues
                .into_iter()
                .map(|issue| (issue.key.clone(), issue))
                .collect(),
            queries: snapshot.queries,
            fetches: Mutex::new(HashMap::new()),
        }
    }

    /// Load a snapshot file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Json` if it
    /// is not a valid snapshot.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            issues = snapshot.issues.len(),
            "Loaded snapshot"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Add or replace an issue
    #[must_use]
    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.insert(issue);
        self
    }

    /// Register the keys returned for `query`
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>, keys: Vec<IssueKey>) -> Self {
        self.queries.insert(query.into(), keys);
        self
    }

    /// Add or replace an issue
    pub fn insert(&mut self, issue: Issue) {
        self.issues.insert(issue.key.clone(), issue);
    }

    /// How many times `key` has been fetched
    pub fn fetch_count(&self, key: &str) -> usize {
        self.fetches
            .lock()
            .map(|fetches| fetches.get(&IssueKey::from(key)).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Total number of fetches across all keys
    pub fn total_fetches(&self) -> usize {
        self.fetches
            .lock()
            .map(|fetches| fetches.values().sum())
            .unwrap_or(0)
    }

    fn query_hits(&self, query: &str) -> &[IssueKey] {
        self.queries
            .get(query)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[async_trait]
impl IssueFetcher for InMemoryFetcher {
    async fn get_issue(&self, key: &IssueKey) -> Result<Issue> {
        if let Ok(mut fetches) = self.fetches.lock() {
            *fetches.entry(key.clone()).or_insert(0) += 1;
        }
        self.issues
            .get(key)
            .cloned()
            .ok_or_else(|| Error::IssueNotFound(key.to_string()))
    }

    async fn search(&self, query: &str) -> Result<Vec<Issue>> {
        self.query_hits(query)
            .iter()
            .map(|key| {
                self.issues
                    .get(key)
                    .cloned()
                    .ok_or_else(|| Error::IssueNotFound(key.to_string()))
            })
            .collect()
    }

    async fn search_keys(&self, query: &str) -> Result<Vec<IssueKey>> {
        Ok(self.query_hits(query).to_vec())
    }

    fn browse_url(&self, key: &IssueKey) -> String {
        format!("memory://browse/{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn issue(key: &str) -> Issue {
        serde_json::from_value(json!({
            "key": key,
            "fields": {
                "summary": format!("Summary of {key}"),
                "status": {"name": "Open"},
                "issuetype": {"name": "Task"}
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_issue_counts_fetches() {
        let fetcher = InMemoryFetcher::new().with_issue(issue("PROJ-1"));

        let key = IssueKey::from("PROJ-1");
        fetcher.get_issue(&key).await.unwrap();
        fetcher.get_issue(&key).await.unwrap();

        assert_eq!(fetcher.fetch_count("PROJ-1"), 2);
        assert_eq!(fetcher.fetch_count("PROJ-2"), 0);
        assert_eq!(fetcher.total_fetches(), 2);
    }

    #[tokio::test]
    async fn test_unknown_issue_is_not_found() {
        let fetcher = InMemoryFetcher::new();
        let err = fetcher
            .get_issue(&IssueKey::from("PROJ-404"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IssueNotFound(key) if key == "PROJ-404"));
    }

    #[tokio::test]
    async fn test_search_uses_registered_queries() {
        let fetcher = InMemoryFetcher::new()
            .with_issue(issue("PROJ-2"))
            .with_query("project = PROJ", vec![IssueKey::from("PROJ-2")]);

        let hits = fetcher.search("project = PROJ").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key.as_str(), "PROJ-2");

        let keys = fetcher.search_keys("project = PROJ").await.unwrap();
        assert_eq!(keys, vec![IssueKey::from("PROJ-2")]);

        assert!(fetcher.search("project = NONE").await.unwrap().is_empty());
        // Searches do not count as fetches
        assert_eq!(fetcher.total_fetches(), 0);
    }

    #[tokio::test]
    async fn test_load_snapshot_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snapshot.json");
        let snapshot = json!({
            "issues": [
                {
                    "key": "PROJ-1",
                    "fields": {
                        "summary": "Root",
                        "status": {"name": "Open"},
                        "issuetype": {"name": "Epic"}
                    }
                }
            ],
            "queries": {"\"Epic Link\" = \"PROJ-1\"": []}
        });
        std::fs::write(&path, snapshot.to_string()).unwrap();

        let fetcher = InMemoryFetcher::load(&path).await.unwrap();
        let root = fetcher.get_issue(&IssueKey::from("PROJ-1")).await.unwrap();
        assert!(root.fields.issue_type.is_epic());
    }

    #[tokio::test]
    async fn test_load_invalid_snapshot_is_json_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snapshot.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = InMemoryFetcher::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
