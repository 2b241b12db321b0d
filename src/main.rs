mod config;
mod error;
mod event;
mod github;
mod routing;
mod sync;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{Result, RouterError};
use crate::event::EventPayload;
use crate::github::GitHubClient;
use crate::sync::RunOutcome;

#[derive(Parser)]
#[command(
  name = "board-router",
  about = "Adds labeled issues and pull requests to GitHub project boards"
)]
struct Cli {
  /// Path to the event payload JSON (defaults to $GITHUB_EVENT_PATH)
  #[arg(short, long)]
  event: Option<PathBuf>,

  /// Path to a route table file overriding the built-in table
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Log the planned board additions without calling the API
  #[arg(long)]
  dry_run: bool,
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  let cli = Cli::parse();

  match run(cli).await {
    Ok(outcome) => info!("run finished: {outcome:?}"),
    Err(e) => {
      error!("{e}");
      std::process::exit(1);
    }
  }
}

async fn run(cli: Cli) -> Result<RunOutcome> {
  // Token check comes first: a token-less run must always skip cleanly,
  // whatever else is wrong with the invocation.
  let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
  let Some(token) = token else {
    info!("GITHUB_TOKEN not set - skipping run");
    return Ok(RunOutcome::SkippedNoToken);
  };

  let config = match &cli.config {
    Some(path) => Config::load(path)?,
    None => Config::default(),
  };

  let payload = load_payload(cli.event.as_deref())?;
  let Some(record) = payload.into_record() else {
    info!("event payload has no issue or pull request");
    return Ok(RunOutcome::NoItem);
  };

  let boards = routing::boards_for(&config.routes, &record.labels);
  if boards.is_empty() {
    info!("no routed labels on {record}");
    return Ok(RunOutcome::Completed { boards: 0 });
  }

  if cli.dry_run {
    for board in &boards {
      info!("dry run: would add {record} to board {board}");
    }
    return Ok(RunOutcome::Completed {
      boards: boards.len(),
    });
  }

  let client = GitHubClient::new(&token)?;
  sync::route_item(Arc::new(client), &config.org, &record, &boards).await?;

  Ok(RunOutcome::Completed {
    boards: boards.len(),
  })
}

fn load_payload(path: Option<&Path>) -> Result<EventPayload> {
  let path = match path {
    Some(p) => p.to_path_buf(),
    None => std::env::var("GITHUB_EVENT_PATH")
      .map(PathBuf::from)
      .map_err(|_| RouterError::Event("no --event path and GITHUB_EVENT_PATH not set".into()))?,
  };

  let content = std::fs::read_to_string(&path)?;
  Ok(serde_json::from_str(&content)?)
}
