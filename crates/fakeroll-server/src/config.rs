use crate::errors::ServerError;
use anyhow::Result;
use fakeroll_datagen::request::DEFAULT_MAX_ERRORS_PER_RECORD;
use fakeroll_datagen::{ErrorRate, LocaleCatalog, RequestLimits};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "fakeroll.yml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
    /// Origins that get CORS headers. Empty disables CORS.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default = "default_max_errors_per_record")]
    pub max_errors_per_record: f64,
    /// YAML file with locale table overrides, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_file: Option<PathBuf>,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3001))
}

fn default_max_errors_per_record() -> f64 {
    DEFAULT_MAX_ERRORS_PER_RECORD
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            cors_allowed_origins: Vec::new(),
            max_errors_per_record: default_max_errors_per_record(),
            locale_file: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `path`. Relative `locale_file` paths are
    /// resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ServerError::ConfigLoadError {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        let mut config: ServerConfig =
            serde_yaml::from_str(&content).map_err(|e| ServerError::ConfigLoadError {
                path: path.to_path_buf(),
                source: e.into(),
            })?;

        if ErrorRate::new(config.max_errors_per_record).is_none() {
            return Err(ServerError::ConfigLoadError {
                path: path.to_path_buf(),
                source: anyhow::anyhow!(
                    "max_errors_per_record must be between 0 and {}, got {}",
                    ErrorRate::MAX,
                    config.max_errors_per_record
                ),
            }
            .into());
        }

        if let (Some(locale_file), Some(dir)) = (config.locale_file.as_mut(), path.parent()) {
            if locale_file.is_relative() {
                *locale_file = dir.join(&*locale_file);
            }
        }

        Ok(config)
    }

    /// Load `path` if given, else `fakeroll.yml` in the working directory if
    /// it exists, else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn request_limits(&self) -> RequestLimits {
        RequestLimits {
            max_errors_per_record: self.max_errors_per_record,
        }
    }

    /// Built-in locale tables, patched from `locale_file` when set.
    pub fn locale_catalog(&self) -> Result<LocaleCatalog> {
        match &self.locale_file {
            Some(path) => Ok(LocaleCatalog::from_file(path)?),
            None => Ok(LocaleCatalog::builtin()),
        }
    }
}
