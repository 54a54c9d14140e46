//! Domain types for issue graph discovery.
//!
//! These types mirror the subset of the issue tracker's JSON representation
//! that graph discovery needs: keys, summaries, statuses, issue types,
//! sub-tasks and typed issue links.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status name that marks an issue as closed.
pub const CLOSED_STATUS: &str = "Closed";

/// Issue type name of an epic.
pub const EPIC_TYPE: &str = "Epic";

/// Unique identifier for an issue (e.g. `PROJ-42`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueKey(String);

impl IssueKey {
    /// Create a new issue key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Project prefix of the key: everything before the first `-`.
    ///
    /// A key without a hyphen is its own project.
    pub fn project(&self) -> &str {
        self.0.split_once('-').map_or(self.0.as_str(), |(prefix, _)| prefix)
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IssueKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IssueKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An issue as returned by the tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue key
    pub key: IssueKey,

    /// Requested fields
    pub fields: IssueFields,
}

/// The fields graph discovery requests for every issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueFields {
    /// One-line summary
    pub summary: String,

    /// Workflow status
    pub status: Status,

    /// Issue type (task, bug, epic, ...)
    #[serde(rename = "issuetype")]
    pub issue_type: IssueType,

    /// Sub-tasks contained in this issue
    #[serde(default)]
    pub subtasks: Vec<IssueRef>,

    /// Typed links to other issues
    #[serde(rename = "issuelinks", default)]
    pub issue_links: Vec<IssueLink>,
}

/// Workflow status of an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Status name (e.g. "In Review", "Closed")
    pub name: String,

    /// Category the status belongs to
    #[serde(rename = "statusCategory", default)]
    pub category: StatusCategory,
}

impl Status {
    /// Create a status with the given name and category name
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: StatusCategory {
                name: category.into(),
            },
        }
    }

    /// Whether this status closes the issue
    pub fn is_closed(&self) -> bool {
        self.name == CLOSED_STATUS
    }
}

/// Coarse status category ("To Do", "In Progress", "Done")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCategory {
    /// Category name
    #[serde(default)]
    pub name: String,
}

/// Type of an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueType {
    /// Type name
    pub name: String,
}

impl IssueType {
    /// Create an issue type with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether this is an epic, whose children come from a search
    pub fn is_epic(&self) -> bool {
        self.name == EPIC_TYPE
    }
}

/// Embedded reference to another issue (sub-task or link endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRef {
    /// Key of the referenced issue
    pub key: IssueKey,

    /// Fields embedded with the reference
    pub fields: RefFields,
}

/// The fields the tracker embeds in an issue reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefFields {
    /// One-line summary
    pub summary: String,

    /// Workflow status
    pub status: Status,
}

/// A typed link between two issues
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueLink {
    /// Link type with its inward and outward descriptions
    #[serde(rename = "type")]
    pub link_type: LinkType,

    /// Set when the other issue references this one
    #[serde(rename = "inwardIssue", default, skip_serializing_if = "Option::is_none")]
    pub inward_issue: Option<IssueRef>,

    /// Set when this issue references the other one
    #[serde(rename = "outwardIssue", default, skip_serializing_if = "Option::is_none")]
    pub outward_issue: Option<IssueRef>,
}

impl IssueLink {
    /// Resolve the direction of this link and the issue at its other end.
    ///
    /// Returns `None` for a link that carries neither endpoint.
    pub fn resolve(&self) -> Option<(LinkDirection, &IssueRef)> {
        if let Some(issue) = &self.outward_issue {
            return Some((LinkDirection::Outward, issue));
        }
        self.inward_issue
            .as_ref()
            .map(|issue| (LinkDirection::Inward, issue))
    }
}

/// Link type descriptions as seen from each end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkType {
    /// Type name (e.g. "Blocks")
    #[serde(default)]
    pub name: String,

    /// Description from the inward end (e.g. "is blocked by")
    pub inward: String,

    /// Description from the outward end (e.g. "blocks")
    pub outward: String,
}

impl LinkType {
    /// Description of the link as read in the given direction
    pub fn label(&self, direction: LinkDirection) -> &str {
        match direction {
            LinkDirection::Inward => &self.inward,
            LinkDirection::Outward => &self.outward,
        }
    }
}

/// Direction of a link relative to the issue that carries it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    /// The other issue references this one
    Inward,

    /// This issue references the other one
    Outward,
}

impl fmt::Display for LinkDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inward => write!(f, "inward"),
            Self::Outward => write!(f, "outward"),
        }
    }
}
