use std::{fs, path::Path};

use serde::Deserialize;
use tracing::info;

use crate::{
    constants::{DEFAULT_HISTORY_CAPACITY, DEFAULT_LISTEN},
    errors::{DaxieError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

const fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl ServiceConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let buf = fs::read_to_string(&path)?;
        let config = Self::from_json(&buf)?;
        info!("loaded service config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ServiceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(DaxieError::Config(
                "history_capacity must be at least 1".into(),
            ));
        }
        if self.listen.trim().is_empty() {
            return Err(DaxieError::Config("listen address must not be empty".into()));
        }
        Ok(())
    }
}
