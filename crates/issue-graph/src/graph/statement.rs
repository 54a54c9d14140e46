//! Graph statements: the declarative lines handed to the emitter.
//!
//! Each statement renders to one line of Graphviz `dot` text through its
//! `Display` implementation. That rendered text is also the identity used
//! when duplicates are removed, so two statements that print the same are
//! the same statement.

use super::format::format_summary;
use crate::config::FormatOptions;
use crate::domain::{IssueKey, Status};
use serde::Serialize;
use std::fmt;

/// Link type label that gets the blocking emphasis.
const BLOCKING_LINK: &str = "blocks";

/// Quoted node label: the issue key followed by its formatted summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeLabel {
    /// Issue key
    pub key: IssueKey,
    /// Summary after truncation or wrapping, already escaped
    pub summary: String,
}

impl NodeLabel {
    /// Build the label for an issue
    pub fn new(key: &IssueKey, summary: &str, options: &FormatOptions) -> Self {
        Self {
            key: key.clone(),
            summary: format_summary(summary, options),
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\\n({})\"", self.key, self.summary)
    }
}

/// Fill color of a node, derived from its status category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    /// Work in progress
    Yellow,
    /// Done
    Green,
    /// Anything else
    White,
}

impl StatusColor {
    /// Map a status to its fill color
    pub fn for_status(status: &Status) -> Self {
        match status.category.name.to_uppercase().as_str() {
            "IN PROGRESS" => Self::Yellow,
            "DONE" => Self::Green,
            _ => Self::White,
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yellow => write!(f, "yellow"),
            Self::Green => write!(f, "green"),
            Self::White => write!(f, "white"),
        }
    }
}

/// Kind and styling of an edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeStyle {
    /// Epic to an issue that references it
    EpicChild,

    /// Issue to one of its sub-tasks
    Subtask,

    /// Typed issue link
    Link {
        /// Link description as read from the owning issue
        label: String,
        /// Whether the link is a blocking relation
        blocking: bool,
    },
}

impl EdgeStyle {
    /// Style for a typed link with the given description
    pub fn link(label: &str) -> Self {
        Self::Link {
            label: label.to_string(),
            blocking: label == BLOCKING_LINK,
        }
    }
}

impl fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EpicChild => write!(f, "[color=orange]"),
            Self::Subtask => write!(f, "[color=blue][label=\"subtask\"]"),
            Self::Link { label, blocking } => {
                let label = label.replace('"', "\\\"");
                if *blocking {
                    write!(f, "[label=\"{label}\",color=\"red\"]")
                } else {
                    write!(f, "[label=\"{label}\"]")
                }
            }
        }
    }
}

/// One line of the graph description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphStatement {
    /// An issue box with its fill color and browser link
    Node {
        /// Node label
        label: NodeLabel,
        /// Browser URL of the issue
        href: String,
        /// Fill color
        fill: StatusColor,
    },

    /// A directed relation between two issues
    Edge {
        /// Label of the issue the relation was discovered from
        from: NodeLabel,
        /// Label of the related issue
        to: NodeLabel,
        /// Edge kind and styling
        style: EdgeStyle,
    },
}

impl GraphStatement {
    /// Whether this is a node statement
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node { .. })
    }

    /// Whether this is an edge statement
    pub fn is_edge(&self) -> bool {
        matches!(self, Self::Edge { .. })
    }
}

impl fmt::Display for GraphStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node { label, href, fill } => write!(
                f,
                "{label} [href=\"{href}\", fillcolor=\"{fill}\", style=filled]"
            ),
            Self::Edge { from, to, style } => write!(f, "{from}->{to}{style}"),
        }
    }
}
