use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
  #[error("config error: {0}")]
  Config(String),

  #[error("config file not found: {0}")]
  ConfigNotFound(PathBuf),

  #[error("event payload error: {0}")]
  Event(String),

  #[error("github error: {0}")]
  GitHub(String),

  #[error("{failed} of {total} board additions failed")]
  Sync { failed: usize, total: usize },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("yaml error: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("octocrab error: {0}")]
  Octocrab(#[from] octocrab::Error),
}

pub type Result<T> = std::result::Result<T, RouterError>;
