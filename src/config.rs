use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use nametag::CasePolicy;
use serde::{Deserialize, Serialize};

use crate::{
    cli::Cli,
    error::{ConfigError, Error},
};

/// Settings read from an optional JSON file and overridden by flags.
/// An empty `tables` list selects the bundled name-prefix table.
///
/// ```json
/// { "tables": ["assets/name_prefix.tbl"], "case": "lowercase", "threads": 4 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tables: Vec<PathBuf>,
    pub case: CasePolicy,
    pub threads: NonZeroUsize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tables: Vec::new(),
            case: CasePolicy::default(),
            threads: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|error| ConfigError::Parse(error.to_string()))
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|error| ConfigError::File(path.to_path_buf(), error.kind()))?;

        Ok(Self::from_json(&text)?)
    }

    /// Builds the effective configuration for one invocation.
    pub async fn resolve(cli: &Cli) -> Result<Self, Error> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path).await?,
            None => Self::default(),
        };

        config.apply(cli);
        Ok(config)
    }

    pub fn apply(&mut self, cli: &Cli) {
        if !cli.tables.is_empty() {
            self.tables = cli.tables.clone();
        }

        if cli.case_sensitive {
            self.case = CasePolicy::Sensitive;
        }

        if let Some(threads) = cli.threads() {
            self.threads = threads;
        }
    }
}
