//! Graph discovery engine.
//!
//! Starting from one or more root issues, the engine walks sub-tasks, epic
//! children and typed links depth-first, fetching every issue at most once,
//! and records what it finds as an ordered list of [`GraphStatement`]s.
//!
//! # Algorithm
//!
//! 1. Fetch the issue and mark it visited *before* looking at its children.
//!    Marking first is what makes the walk terminate on cyclic link graphs.
//! 2. Apply the skip predicate ([`filter::skip_reason`]). A skipped issue
//!    emits nothing and its children are not explored.
//! 3. Emit the issue's node statement.
//! 4. Collect children in order: epic children, sub-tasks, then links that
//!    pass [`filter::evaluate_link`]. Edge statements are emitted as the
//!    children are collected.
//! 5. Walk every child that is still unvisited, in order.
//!
//! The visited set and the statement list are shared across all roots of a
//! run, so shared descendants are expanded once. Link endpoints rejected for
//! sitting in another project are kept apart from the visited set: that
//! verdict depends on the root, and a later root from that project is still
//! walked.

pub mod dedup;
pub mod filter;
pub mod format;
pub mod statement;

pub use dedup::dedup_statements;
pub use filter::{HiddenReason, IgnoreReason, LinkDecision, SkipReason, evaluate_link, skip_reason};
pub use statement::{EdgeStyle, GraphStatement, NodeLabel, StatusColor};

use crate::config::FilterConfig;
use crate::domain::{Issue, IssueKey, LinkDirection};
use crate::error::Result;
use crate::fetcher::{IssueFetcher, epic_children_query};
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashSet;
use tracing::debug;

/// Mutable state of one discovery run.
#[derive(Debug, Default)]
pub struct TraversalState {
    /// Keys already fetched, or rejected for a reason that holds for every root
    pub visited: HashSet<IssueKey>,
    /// Keys rejected only for lying outside the project of the root being walked
    pub foreign: HashSet<IssueKey>,
    /// Statements in order of discovery, duplicates included
    pub statements: Vec<GraphStatement>,
}

/// Discover the graph reachable from `roots` and return it without duplicates.
///
/// Roots are processed in order; a root already reached from an earlier root
/// is not walked again.
///
/// # Errors
///
/// The first fetch or search failure aborts the run and is returned as is.
pub async fn discover(
    fetcher: &dyn IssueFetcher,
    roots: &[IssueKey],
    config: &FilterConfig,
) -> Result<Vec<GraphStatement>> {
    let statements = walk_statements(fetcher, roots, config).await?;
    Ok(dedup_statements(statements))
}

/// Walk the graph reachable from `roots` and return every statement in
/// discovery order, before duplicate removal.
///
/// # Errors
///
/// The first fetch or search failure aborts the run and is returned as is.
pub async fn walk_statements(
    fetcher: &dyn IssueFetcher,
    roots: &[IssueKey],
    config: &FilterConfig,
) -> Result<Vec<GraphStatement>> {
    let mut walker = Walker {
        fetcher,
        config,
        project: String::new(),
        state: TraversalState::default(),
    };

    for root in roots {
        if walker.state.visited.contains(root) {
            debug!("Skipping root {root} - already visited");
            continue;
        }
        if walker.state.foreign.contains(root) {
            debug!("Walking root {root} - outside the project of an earlier root");
        }
        walker.project = root.project().to_string();
        walker.walk(root.clone()).await?;
    }

    debug!(
        visited = walker.state.visited.len(),
        statements = walker.state.statements.len(),
        "Discovery finished"
    );
    Ok(walker.state.statements)
}

/// Traversal context for one run.
struct Walker<'a> {
    fetcher: &'a dyn IssueFetcher,
    config: &'a FilterConfig,
    /// Project prefix of the root being walked
    project: String,
    state: TraversalState,
}

impl Walker<'_> {
    fn walk(&mut self, key: IssueKey) -> BoxFuture<'_, Result<()>> {
        async move {
            let issue = self.fetcher.get_issue(&key).await?;
            self.state.visited.insert(key);

            if let Some(reason) = skip_reason(
                self.config,
                &self.project,
                &issue.key,
                &issue.fields.status,
            ) {
                debug!("Skipping {} - {reason}", issue.key);
                return Ok(());
            }

            let owner = NodeLabel::new(
                &issue.key,
                &issue.fields.summary,
                &self.config.format,
            );
            self.state.statements.push(GraphStatement::Node {
                label: owner.clone(),
                href: self.fetcher.browse_url(&issue.key),
                fill: StatusColor::for_status(&issue.fields.status),
            });

            let mut children = Vec::new();
            if !self.config.ignore_subtasks {
                if issue.fields.issue_type.is_epic() && !self.config.ignore_epic {
                    self.collect_epic_children(&issue, &owner, &mut children)
                        .await?;
                }
                self.collect_subtasks(&issue, &owner, &mut children);
            }
            self.collect_links(&issue, &owner, &mut children);

            for child in children {
                if self.state.visited.contains(&child) {
                    continue;
                }
                self.walk(child).await?;
            }
            Ok(())
        }
        .boxed()
    }

    async fn collect_epic_children(
        &mut self,
        epic: &Issue,
        owner: &NodeLabel,
        children: &mut Vec<IssueKey>,
    ) -> Result<()> {
        let members = self.fetcher.search(&epic_children_query(&epic.key)).await?;
        for member in members {
            if let Some(reason) = skip_reason(
                self.config,
                &self.project,
                &member.key,
                &member.fields.status,
            ) {
                debug!("Skipping {} - {reason}", member.key);
                continue;
            }
            debug!("{} => references epic => {}", member.key, epic.key);
            self.state.statements.push(GraphStatement::Edge {
                from: owner.clone(),
                to: NodeLabel::new(&member.key, &member.fields.summary, &self.config.format),
                style: EdgeStyle::EpicChild,
            });
            children.push(member.key);
        }
        Ok(())
    }

    fn collect_subtasks(&mut self, issue: &Issue, owner: &NodeLabel, children: &mut Vec<IssueKey>) {
        for subtask in &issue.fields.subtasks {
            debug!("{} => has subtask => {}", issue.key, subtask.key);
            self.state.statements.push(GraphStatement::Edge {
                from: owner.clone(),
                to: NodeLabel::new(&subtask.key, &subtask.fields.summary, &self.config.format),
                style: EdgeStyle::Subtask,
            });
            children.push(subtask.key.clone());
        }
    }

    fn collect_links(&mut self, issue: &Issue, owner: &NodeLabel, children: &mut Vec<IssueKey>) {
        for link in &issue.fields.issue_links {
            match evaluate_link(self.config, &self.project, link) {
                LinkDecision::Ignored { target, reason } => {
                    if let Some(target) = target {
                        debug!("Skipping {target} - {reason}");
                        match reason {
                            // Never fetched later in the run.
                            IgnoreReason::Skipped(SkipReason::Closed) => {
                                self.state.visited.insert(target);
                            }
                            // Depends on the root; a later root may still walk it.
                            IgnoreReason::Skipped(SkipReason::OtherProject) => {
                                self.state.foreign.insert(target);
                            }
                            _ => {}
                        }
                    }
                }
                LinkDecision::Hidden { target, reason } => {
                    debug!("Following {target} without an edge ({reason:?})");
                    children.push(target);
                }
                LinkDecision::Shown {
                    target,
                    direction,
                    label,
                } => {
                    let arrow = match direction {
                        LinkDirection::Outward => "=>",
                        LinkDirection::Inward => "<=",
                    };
                    debug!("{} {arrow} {label} {arrow} {target}", issue.key);

                    // `Shown` is only produced for links with an endpoint.
                    if let Some((_, linked)) = link.resolve() {
                        self.state.statements.push(GraphStatement::Edge {
                            from: owner.clone(),
                            to: NodeLabel::new(
                                &linked.key,
                                &linked.fields.summary,
                                &self.config.format,
                            ),
                            style: EdgeStyle::link(&label),
                        });
                    }
                    children.push(target);
                }
            }
        }
    }
}
