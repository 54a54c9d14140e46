//! Jira REST client.
//!
//! Only two endpoints are used: `issue/{key}` to fetch a single issue and
//! `search` to run JQL queries. Both request exactly the fields listed in
//! [`ISSUE_FIELDS`].

use super::{ISSUE_FIELDS, IssueFetcher};
use crate::domain::{Issue, IssueKey};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::info;

/// REST API root relative to the tracker base URL.
const API_PATH: &str = "/rest/api/latest";

/// Page size used when resolving a query to root keys.
const MAX_KEY_RESULTS: usize = 100;

/// How requests authenticate against the tracker
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// HTTP basic authentication
    Basic {
        /// User name
        user: String,
        /// Password or API token
        password: String,
    },

    /// A `JSESSIONID` cookie taken from a logged-in browser session
    Cookie(String),

    /// Anonymous access
    None,
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { user, .. } => f
                .debug_struct("Basic")
                .field("user", user)
                .field("password", &"<redacted>")
                .finish(),
            Self::Cookie(_) => f.debug_tuple("Cookie").field(&"<redacted>").finish(),
            Self::None => f.write_str("None"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    issues: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct KeyOnly {
    key: IssueKey,
}

/// Issue fetcher backed by the Jira REST API.
pub struct JiraClient {
    base_url: String,
    api_url: String,
    auth: Auth,
    http: reqwest::Client,
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl JiraClient {
    /// Create a client for the tracker at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client cannot be built.
    pub fn new(base_url: &str, auth: Auth, no_verify_ssl: bool) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(no_verify_ssl)
            .build()?;

        Ok(Self {
            api_url: format!("{base_url}{API_PATH}"),
            base_url,
            auth,
            http,
        })
    }

    /// Base URL of the tracker
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, uri: &str, params: &[(&str, String)]) -> RequestBuilder {
        let request = self
            .http
            .get(format!("{}{}", self.api_url, uri))
            .query(params)
            .header(CONTENT_TYPE, "application/json");

        match &self.auth {
            Auth::Basic { user, password } => request.basic_auth(user, Some(password)),
            Auth::Cookie(session) => request.header(COOKIE, format!("JSESSIONID={session}")),
            Auth::None => request,
        }
    }

    async fn send_search<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let search_error = |source| Error::Search {
            query: query.to_string(),
            source,
        };

        let body = self
            .get("/search", params)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(search_error)?
            .bytes()
            .await
            .map_err(search_error)?;

        let response: SearchResponse<T> =
            serde_json::from_slice(&body).map_err(|source| Error::MalformedIssue {
                key: query.to_string(),
                source,
            })?;
        Ok(response.issues)
    }
}

#[async_trait]
impl IssueFetcher for JiraClient {
    async fn get_issue(&self, key: &IssueKey) -> Result<Issue> {
        info!("Fetching {key}");
        let fetch_error = |source| Error::Fetch {
            key: key.to_string(),
            source,
        };

        let body = self
            .get(
                &format!("/issue/{key}"),
                &[("fields", ISSUE_FIELDS.join(","))],
            )
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(fetch_error)?
            .bytes()
            .await
            .map_err(fetch_error)?;

        serde_json::from_slice(&body).map_err(|source| Error::MalformedIssue {
            key: key.to_string(),
            source,
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<Issue>> {
        info!("Querying {query}");
        self.send_search(
            query,
            &[
                ("jql", query.to_string()),
                ("fields", ISSUE_FIELDS.join(",")),
            ],
        )
        .await
    }

    async fn search_keys(&self, query: &str) -> Result<Vec<IssueKey>> {
        info!("Querying {query}");
        let hits: Vec<KeyOnly> = self
            .send_search(
                query,
                &[
                    ("jql", query.to_string()),
                    ("fields", "key".to_string()),
                    ("maxResults", MAX_KEY_RESULTS.to_string()),
                ],
            )
            .await?;
        Ok(hits.into_iter().map(|hit| hit.key).collect())
    }

    fn browse_url(&self, key: &IssueKey) -> String {
        format!("{}/browse/{}", self.base_url, key)
    }
}
