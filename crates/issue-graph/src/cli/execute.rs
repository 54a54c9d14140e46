//! Command execution logic.

use anyhow::{Context, Result, bail};
use dialoguer::{Input, Password};

use super::Cli;
use super::args::ConnectionArgs;
use crate::config::Settings;
use crate::domain::IssueKey;
use crate::fetcher::{Auth, InMemoryFetcher, IssueFetcher, JiraClient};
use crate::graph;
use crate::output::{self, DotDocument};

/// Environment variable consulted when `--user` is absent
pub const USER_ENV: &str = "JIRA_USER";

/// Environment variable consulted when `--password` is absent
pub const PASSWORD_ENV: &str = "JIRA_PASSWORD";

/// Discover the graph and emit it
pub async fn execute(cli: &Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path).await?,
        None => Settings::discover(&std::env::current_dir()?).await?,
    };

    let fetcher: Box<dyn IssueFetcher> = match &cli.snapshot {
        Some(path) => Box::new(
            InMemoryFetcher::load(path)
                .await
                .with_context(|| format!("Failed to load snapshot {}", path.display()))?,
        ),
        None => Box::new(connect(&cli.connection, &settings)?),
    };

    let roots = resolve_roots(fetcher.as_ref(), &cli.issues, cli.jql.as_deref()).await?;
    if roots.is_empty() {
        bail!("No issues to start from: the query matched nothing");
    }

    let config = cli.filter.to_filter_config(&settings);
    let statements = graph::discover(fetcher.as_ref(), &roots, &config).await?;
    tracing::info!(
        roots = roots.len(),
        statements = statements.len(),
        "Graph discovered"
    );

    let document = DotDocument::new(cli.output.node_shape(&settings), statements);
    output::emit(&document, &cli.output.target(&settings)).await?;
    Ok(())
}

/// Positional keys first, then the keys matched by `jql`
pub async fn resolve_roots(
    fetcher: &dyn IssueFetcher,
    keys: &[String],
    jql: Option<&str>,
) -> Result<Vec<IssueKey>> {
    let mut roots: Vec<IssueKey> = keys.iter().map(|key| IssueKey::from(key.as_str())).collect();
    if let Some(query) = jql {
        roots.extend(fetcher.search_keys(query).await?);
    }
    Ok(roots)
}

/// Build the tracker client from flags, settings, environment and prompts
fn connect(args: &ConnectionArgs, settings: &Settings) -> Result<JiraClient> {
    let Some(url) = args.jira_url.as_ref().or(settings.jira_url.as_ref()) else {
        bail!("No tracker URL given. Pass --jira or set jira-url in the settings file");
    };

    let auth = if let Some(cookie) = &args.cookie {
        Auth::Cookie(cookie.clone())
    } else if args.no_auth {
        Auth::None
    } else {
        let user = match args
            .user
            .clone()
            .or_else(|| std::env::var(USER_ENV).ok())
            .or_else(|| settings.user.clone())
        {
            Some(user) => user,
            None => Input::<String>::new()
                .with_prompt("Username")
                .interact_text()?,
        };
        let password = match args
            .password
            .clone()
            .or_else(|| std::env::var(PASSWORD_ENV).ok())
        {
            Some(password) => password,
            None => Password::new().with_prompt("Password").interact()?,
        };
        Auth::Basic { user, password }
    };

    Ok(JiraClient::new(url, auth, args.no_verify_ssl)?)
}
