//! Issue Graph CLI binary.

use anyhow::Result;
use issue_graph::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the issue-graph CLI.
///
/// Uses tokio's current_thread runtime: the walk fetches one issue at a time.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so the graph printed on stdout stays clean.
    // Example: RUST_LOG=issue_graph=debug issue-graph PROJ-1 --local
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("issue_graph=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting issue-graph CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Issue-graph CLI completed successfully");
    Ok(())
}
