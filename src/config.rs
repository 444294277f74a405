//! Runtime configuration: an optional YAML file plus environment overrides.
//!
//! ```yaml
//! bind_addr: 127.0.0.1:3000
//! log_filter: info
//! data:
//!   base_url: https://raw.githubusercontent.com/cohstats/coh3-data/master/data
//!   data_dir: ./snapshot   # optional; read a local checkout instead
//! ```

use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::source::{SnapshotSource, DEFAULT_DATA_URL};
use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "COH3_EXPLORER_CONFIG";
pub const BIND_ENV: &str = "COH3_EXPLORER_BIND";
pub const DATA_DIR_ENV: &str = "COH3_EXPLORER_DATA_DIR";
pub const DATA_URL_ENV: &str = "COH3_EXPLORER_DATA_URL";
pub const DEFAULT_CONFIG_PATH: &str = "coh3-explorer.yaml";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    DEFAULT_DATA_URL.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            base_url: default_base_url(),
            data_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub data: DataConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: default_bind_addr(),
            log_filter: default_log_filter(),
            data: DataConfig::default(),
        }
    }
}

impl Config {
    /// Load from `COH3_EXPLORER_CONFIG` (or `coh3-explorer.yaml` when present),
    /// then apply environment overrides.
    pub fn load() -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        let explicit = vars.get(CONFIG_PATH_ENV).map(PathBuf::from);
        let config = match explicit {
            Some(path) => Config::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Config::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Config::default(),
        };
        config.with_overrides(&vars)
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_yaml(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Config, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Apply `COH3_EXPLORER_*` overrides from `vars` and validate the result.
    pub fn with_overrides(mut self, vars: &HashMap<String, String>) -> Result<Config, ConfigError> {
        if let Some(bind) = vars.get(BIND_ENV) {
            self.bind_addr = bind.clone();
        }
        if let Some(dir) = vars.get(DATA_DIR_ENV) {
            self.data.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = vars.get(DATA_URL_ENV) {
            self.data.base_url = url.clone();
        }
        self.socket_addr()?;
        Ok(self)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.bind_addr.clone()))
    }

    /// A local data directory wins over the remote repository.
    pub fn snapshot_source(&self) -> SnapshotSource {
        match &self.data.data_dir {
            Some(dir) => SnapshotSource::directory(dir),
            None => SnapshotSource::http(&self.data.base_url),
        }
    }
}
