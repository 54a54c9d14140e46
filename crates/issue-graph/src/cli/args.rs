//! CLI argument groups.
//!
//! The flags are grouped by concern and flattened into [`super::Cli`]:
//! tracker connection, graph filters, and output.

use clap::Args;
use std::path::PathBuf;

use super::types::DirectionArg;
use super::validators::{validate_issue_key, validate_summary_length};
use crate::config::{
    DEFAULT_CHART_URL, DEFAULT_NODE_SHAPE, Directions, FilterConfig, FormatOptions, Settings,
};
use crate::domain::LinkDirection;
use crate::output::RenderTarget;

/// How to reach and authenticate against the tracker
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Tracker base URL, with protocol (e.g. https://jira.example.com)
    #[arg(short, long = "jira")]
    pub jira_url: Option<String>,

    /// User name for basic authentication (falls back to JIRA_USER, then a prompt)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password for basic authentication (falls back to JIRA_PASSWORD, then a prompt)
    #[arg(short, long)]
    pub password: Option<String>,

    /// JSESSIONID session cookie value taken from a logged-in browser
    #[arg(short, long, conflicts_with_all = ["user", "password", "no_auth"])]
    pub cookie: Option<String>,

    /// Use no authentication
    #[arg(short = 'N', long, conflicts_with_all = ["user", "password"])]
    pub no_auth: bool,

    /// Don't verify SSL certificates
    #[arg(long)]
    pub no_verify_ssl: bool,
}

/// Which issues and links end up in the graph
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Don't follow an epic into its children
    #[arg(short = 'e', long)]
    pub ignore_epic: bool,

    /// Don't include sub-tasks (or epic children)
    #[arg(short = 't', long)]
    pub ignore_subtasks: bool,

    /// Ignore closed issues
    #[arg(long)]
    pub ignore_closed: bool,

    /// Link type to follow without drawing (repeatable)
    #[arg(short = 'x', long = "exclude-link", value_name = "LINK_TYPE")]
    pub exclude_links: Vec<String>,

    /// Only follow links to issues whose key contains this text
    #[arg(short = 'i', long = "issue-include", value_name = "TEXT")]
    pub issue_include: Option<String>,

    /// Issue key never to follow (repeatable)
    #[arg(long = "issue-exclude", value_name = "KEY", value_parser = validate_issue_key)]
    pub issue_excludes: Vec<String>,

    /// Link directions to walk
    #[arg(
        short = 'd',
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [DirectionArg::Inward, DirectionArg::Outward]
    )]
    pub directions: Vec<DirectionArg>,

    /// Link directions to draw
    #[arg(
        short = 's',
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [DirectionArg::Inward, DirectionArg::Outward]
    )]
    pub show_directions: Vec<DirectionArg>,

    /// Follow links into other projects
    #[arg(long)]
    pub cross_projects: bool,

    /// Word wrap issue summaries instead of truncating them
    #[arg(short, long)]
    pub word_wrap: bool,

    /// Maximum summary length before truncating or wrapping
    #[arg(long, value_parser = validate_summary_length)]
    pub summary_length: Option<usize>,
}

impl FilterArgs {
    /// Build the engine configuration, layering flags over settings
    pub fn to_filter_config(&self, settings: &Settings) -> FilterConfig {
        let excluded_link_types = settings
            .exclude_links
            .iter()
            .chain(&self.exclude_links)
            .map(|link| link.trim().to_string())
            .collect();

        FilterConfig {
            traverse: directions(&self.directions),
            show: directions(&self.show_directions),
            excluded_link_types,
            excluded_issues: self.issue_excludes.iter().cloned().collect(),
            include_filter: self
                .issue_include
                .clone()
                .filter(|include| !include.is_empty()),
            ignore_closed: self.ignore_closed,
            ignore_epic: self.ignore_epic,
            ignore_subtasks: self.ignore_subtasks,
            restrict_to_project: !self.cross_projects,
            format: FormatOptions {
                word_wrap: self.word_wrap,
                max_summary_length: self
                    .summary_length
                    .or(settings.summary_length)
                    .unwrap_or(FormatOptions::default().max_summary_length),
            },
        }
    }
}

fn directions(args: &[DirectionArg]) -> Directions {
    args.iter().copied().map(LinkDirection::from).collect()
}

/// Where the graph is written
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Image file to write
    #[arg(short, long, default_value = "issue_graph.png")]
    pub file: PathBuf,

    /// Print the Graphviz text to stdout instead of rendering an image
    #[arg(short, long, conflicts_with_all = ["json", "dot"])]
    pub local: bool,

    /// Print the graph statements as JSON
    #[arg(long, conflicts_with = "dot")]
    pub json: bool,

    /// Render with a local Graphviz installation instead of the chart service
    #[arg(long)]
    pub dot: bool,

    /// Graphviz executable used with --dot
    #[arg(long, default_value = "dot")]
    pub dot_program: String,

    /// Output format used with --dot (png, svg, pdf, ...)
    #[arg(long, default_value = "png")]
    pub dot_format: String,

    /// Node shape (box, circle, ellipse, ...)
    #[arg(long)]
    pub node_shape: Option<String>,

    /// Charting service URL
    #[arg(long)]
    pub chart_url: Option<String>,
}

impl OutputArgs {
    /// Node shape, layering the flag over settings
    pub fn node_shape(&self, settings: &Settings) -> String {
        self.node_shape
            .clone()
            .or_else(|| settings.node_shape.clone())
            .unwrap_or_else(|| DEFAULT_NODE_SHAPE.to_string())
    }

    /// Rendering backend selected by the flags
    pub fn target(&self, settings: &Settings) -> RenderTarget {
        if self.local {
            RenderTarget::Stdout
        } else if self.json {
            RenderTarget::Json
        } else if self.dot {
            RenderTarget::Dot {
                program: self.dot_program.clone(),
                format: self.dot_format.clone(),
                file: self.file.clone(),
            }
        } else {
            RenderTarget::Chart {
                url: self
                    .chart_url
                    .clone()
                    .or_else(|| settings.chart_url.clone())
                    .unwrap_or_else(|| DEFAULT_CHART_URL.to_string()),
                file: self.file.clone(),
            }
        }
    }
}
