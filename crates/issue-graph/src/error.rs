//! Error types for issue graph operations.

use std::io;
use thiserror::Error;

/// The error type for issue graph operations.
///
/// Any error raised while fetching aborts the whole discovery run; nothing
/// is retried and no partial graph is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching a single issue failed (network, authentication, not found).
    #[error("Failed to fetch issue {key}: {source}")]
    Fetch {
        /// Key of the issue being fetched.
        key: String,
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },

    /// Running a search query failed.
    #[error("Search failed for query '{query}': {source}")]
    Search {
        /// The query that was sent.
        query: String,
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },

    /// The tracker returned an issue without the fields that were requested.
    #[error("Malformed issue record for {key}: {source}")]
    MalformedIssue {
        /// Key of the issue being decoded.
        key: String,
        /// The decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// Issue not found.
    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    /// HTTP client error outside a specific fetch.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rendering the graph to an image failed.
    #[error("Render error: {0}")]
    Render(String),
}

/// A specialized Result type for issue graph operations.
pub type Result<T> = std::result::Result<T, Error>;
