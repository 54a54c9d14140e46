//! Configuration for graph discovery.
//!
//! Two layers live here:
//!
//! - [`FilterConfig`]: the value object the discovery engine consumes. It
//!   decides which issues are expanded, which links are followed, and which
//!   edges are drawn.
//! - [`Settings`]: the optional `.issue-graph.yaml` file holding per-user
//!   defaults (tracker URL, user name, node shape, ...). Command-line flags
//!   override it.

use crate::domain::LinkDirection;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the settings file searched for in the working directory and its parents
pub const SETTINGS_FILE_NAME: &str = ".issue-graph.yaml";

/// Maximum directory depth to traverse when searching for the settings file
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Default maximum length of a rendered summary
pub const DEFAULT_SUMMARY_LENGTH: usize = 30;

/// Default Graphviz node shape
pub const DEFAULT_NODE_SHAPE: &str = "box";

/// Default charting service used to render images remotely
pub const DEFAULT_CHART_URL: &str = "https://chart.apis.google.com/chart";

/// A set of link directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directions {
    /// Include inward links
    pub inward: bool,
    /// Include outward links
    pub outward: bool,
}

impl Directions {
    /// Both inward and outward
    pub const fn both() -> Self {
        Self {
            inward: true,
            outward: true,
        }
    }

    /// No direction at all
    pub const fn none() -> Self {
        Self {
            inward: false,
            outward: false,
        }
    }

    /// Whether the set contains `direction`
    pub fn contains(&self, direction: LinkDirection) -> bool {
        match direction {
            LinkDirection::Inward => self.inward,
            LinkDirection::Outward => self.outward,
        }
    }
}

impl Default for Directions {
    fn default() -> Self {
        Self::both()
    }
}

impl FromIterator<LinkDirection> for Directions {
    fn from_iter<I: IntoIterator<Item = LinkDirection>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), |mut set, direction| {
            match direction {
                LinkDirection::Inward => set.inward = true,
                LinkDirection::Outward => set.outward = true,
            }
            set
        })
    }
}

/// How issue summaries are shortened in node labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Wrap long summaries onto several lines instead of truncating them
    pub word_wrap: bool,

    /// Maximum summary length before wrapping or truncation kicks in
    pub max_summary_length: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            word_wrap: false,
            max_summary_length: DEFAULT_SUMMARY_LENGTH,
        }
    }
}

/// Every parameter the discovery engine needs.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Link directions that propagate the walk
    pub traverse: Directions,

    /// Link directions that produce an edge statement
    pub show: Directions,

    /// Link type labels (trimmed) whose edges are not drawn
    pub excluded_link_types: Vec<String>,

    /// Issue keys that are never followed through a link
    pub excluded_issues: HashSet<String>,

    /// When set, linked issue keys must contain this substring
    pub include_filter: Option<String>,

    /// Skip closed issues and links to closed issues
    pub ignore_closed: bool,

    /// Do not expand epics into the issues that reference them
    pub ignore_epic: bool,

    /// Do not follow sub-tasks (or epic children)
    pub ignore_subtasks: bool,

    /// Skip issues outside the root's project
    pub restrict_to_project: bool,

    /// Node label formatting
    pub format: FormatOptions,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            traverse: Directions::both(),
            show: Directions::both(),
            excluded_link_types: Vec::new(),
            excluded_issues: HashSet::new(),
            include_filter: None,
            ignore_closed: false,
            ignore_epic: false,
            ignore_subtasks: false,
            restrict_to_project: true,
            format: FormatOptions::default(),
        }
    }
}

/// Settings file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Base URL of the tracker (with protocol)
    pub jira_url: Option<String>,

    /// User name for basic authentication
    pub user: Option<String>,

    /// Graphviz node shape
    pub node_shape: Option<String>,

    /// Maximum summary length
    pub summary_length: Option<usize>,

    /// Link types excluded from rendering in addition to `--exclude-link`
    #[serde(default)]
    pub exclude_links: Vec<String>,

    /// Charting service URL
    pub chart_url: Option<String>,
}

impl Settings {
    /// Load settings from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let settings: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        settings
            .validate()
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(settings)
    }

    /// Check values the YAML schema cannot express
    fn validate(&self) -> std::result::Result<(), String> {
        if self.summary_length == Some(0) {
            return Err("summary-length must be at least 1".to_string());
        }
        Ok(())
    }

    /// Load the settings file found at or above `start_dir`, or defaults when none exists
    pub async fn discover(start_dir: &Path) -> Result<Self> {
        match find_settings_file(start_dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading settings");
                Self::load(&path).await
            }
            None => Ok(Self::default()),
        }
    }
}

/// Find the settings file by searching up the directory tree.
pub fn find_settings_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        let candidate = current.join(SETTINGS_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
