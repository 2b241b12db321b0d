use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::error::{Result, RouterError};
use crate::event::ItemRecord;
use crate::github::BoardService;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
  SkippedNoToken,
  NoItem,
  Completed { boards: usize },
}

// One resolve-then-add pipeline per board, launched concurrently. All
// pipelines are drained before returning; per-board failures are logged
// and rolled into a single aggregate error so a failing board never
// blocks a succeeding one.
pub async fn route_item(
  service: Arc<dyn BoardService>,
  org: &str,
  record: &ItemRecord,
  boards: &[u64],
) -> Result<()> {
  let mut pipelines = JoinSet::new();

  for &board in boards {
    let service = service.clone();
    let org = org.to_string();
    let content_id = record.id.clone();
    let number = record.number;

    pipelines.spawn(async move {
      info!("adding #{number} to board {board}");
      let project_id = service.project_id(&org, board).await?;
      let item_id = service.add_item(&project_id, &content_id).await?;
      debug!("board {board}: created item {item_id}");
      Ok::<u64, RouterError>(board)
    });
  }

  let total = boards.len();
  let mut failed = 0;

  while let Some(result) = pipelines.join_next().await {
    match result {
      Ok(Ok(_)) => {}
      Ok(Err(e)) => {
        failed += 1;
        error!("board addition failed: {e}");
      }
      Err(e) => {
        failed += 1;
        error!("board task join error: {e}");
      }
    }
  }

  if failed > 0 {
    return Err(RouterError::Sync { failed, total });
  }

  info!("added {record} to {total} board(s)");
  Ok(())
}
