use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_org")]
    pub org: String,
    #[serde(default = "default_routes")]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    pub label: String,
    pub board: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            org: default_org(),
            routes: default_routes(),
        }
    }
}

fn default_org() -> String {
    "gradle".to_string()
}

fn default_routes() -> Vec<Route> {
    vec![
        Route {
            label: "@execution".into(),
            board: 24,
        },
        Route {
            label: "@dev-productivity".into(),
            board: 17,
        },
    ]
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RouterError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.org.is_empty() {
            return Err(RouterError::Config("org must not be empty".into()));
        }
        for route in &self.routes {
            if route.label.is_empty() {
                return Err(RouterError::Config(format!(
                    "route for board {} has an empty label",
                    route.board
                )));
            }
        }
        Ok(())
    }
}
