//! Issue and link filters.
//!
//! Two independent gates decide what the walk does:
//!
//! - [`skip_reason`] decides whether an issue is expanded at all.
//! - [`evaluate_link`] decides whether a link is followed, and separately
//!   whether its edge is drawn.
//!
//! Following and drawing are orthogonal: a link can advance the walk without
//! producing an edge (excluded link type, or a direction that is traversed but
//! not shown), while a link that is ignored does neither.

use crate::config::FilterConfig;
use crate::domain::{IssueKey, IssueLink, LinkDirection, Status};
use std::fmt;

/// Why an issue is not expanded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The issue is closed and closed issues are ignored
    Closed,
    /// The issue belongs to another project
    OtherProject,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "it is Closed"),
            Self::OtherProject => write!(f, "not traversing to a different project"),
        }
    }
}

/// Decide whether an issue is skipped entirely.
///
/// `project` is the project prefix of the root currently being walked.
pub fn skip_reason(
    config: &FilterConfig,
    project: &str,
    key: &IssueKey,
    status: &Status,
) -> Option<SkipReason> {
    if config.ignore_closed && status.is_closed() {
        return Some(SkipReason::Closed);
    }
    if config.restrict_to_project && key.project() != project {
        return Some(SkipReason::OtherProject);
    }
    None
}

/// Why a link is neither followed nor drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The link has no endpoint
    NoEndpoint,
    /// The link's direction is not traversed
    DirectionNotTraversed,
    /// The linked issue fails the skip predicate
    Skipped(SkipReason),
    /// The linked issue is explicitly excluded
    ExcludedIssue,
    /// The linked key does not contain the include filter
    NotIncluded,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEndpoint => write!(f, "link has no endpoint"),
            Self::DirectionNotTraversed => write!(f, "direction is not traversed"),
            Self::Skipped(reason) => write!(f, "{reason}"),
            Self::ExcludedIssue => write!(f, "explicitly excluded"),
            Self::NotIncluded => write!(f, "does not match the include filter"),
        }
    }
}

/// Why a followed link produces no edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiddenReason {
    /// The link type is in the exclusion list
    ExcludedType,
    /// The link's direction is traversed but not shown
    DirectionNotShown,
}

/// Outcome of evaluating one link on an expanded issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDecision {
    /// Neither followed nor drawn
    Ignored {
        /// Linked issue, when the link has one
        target: Option<IssueKey>,
        /// Why the link was dropped
        reason: IgnoreReason,
    },

    /// Followed, but no edge is drawn
    Hidden {
        /// Linked issue
        target: IssueKey,
        /// Why the edge is not drawn
        reason: HiddenReason,
    },

    /// Followed and drawn
    Shown {
        /// Linked issue
        target: IssueKey,
        /// Direction of the link
        direction: LinkDirection,
        /// Link description as read in that direction
        label: String,
    },
}

/// Evaluate one link of an expanded issue.
///
/// The checks run in a fixed order and the first one that applies wins.
pub fn evaluate_link(config: &FilterConfig, project: &str, link: &IssueLink) -> LinkDecision {
    let Some((direction, linked)) = link.resolve() else {
        return LinkDecision::Ignored {
            target: None,
            reason: IgnoreReason::NoEndpoint,
        };
    };
    let target = linked.key.clone();

    if !config.traverse.contains(direction) {
        return LinkDecision::Ignored {
            target: Some(target),
            reason: IgnoreReason::DirectionNotTraversed,
        };
    }

    if let Some(reason) = skip_reason(config, project, &linked.key, &linked.fields.status) {
        return LinkDecision::Ignored {
            target: Some(target),
            reason: IgnoreReason::Skipped(reason),
        };
    }

    if config.excluded_issues.contains(linked.key.as_str()) {
        return LinkDecision::Ignored {
            target: Some(target),
            reason: IgnoreReason::ExcludedIssue,
        };
    }

    if let Some(include) = &config.include_filter {
        if !linked.key.as_str().contains(include.as_str()) {
            return LinkDecision::Ignored {
                target: Some(target),
                reason: IgnoreReason::NotIncluded,
            };
        }
    }

    let label = link.link_type.label(direction);

    if config
        .excluded_link_types
        .iter()
        .any(|excluded| excluded == label.trim())
    {
        return LinkDecision::Hidden {
            target,
            reason: HiddenReason::ExcludedType,
        };
    }

    if !config.show.contains(direction) {
        return LinkDecision::Hidden {
            target,
            reason: HiddenReason::DirectionNotShown,
        };
    }

    LinkDecision::Shown {
        target,
        direction,
        label: label.to_string(),
    }
}
