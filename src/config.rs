/*============================================================
  Project: apkver
  Module: apkver::config
  ------------------------------------------------------------
  Purpose:
    Load operator configuration for HTTP behaviour and logging
    from an optional TOML file.

  Security / Safety Notes:
    Only reads files; the release source URL is compiled in and
    cannot be redirected through configuration.

  Dependencies:
    serde + toml for parsing, dirs for the default location.

  Revision History:
    2026-10-19  Authored configuration loader.
============================================================*/

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{FetchError, Result};

/// Browser identity presented to the listing site.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_DIR_NAME: &str = "apkver";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetcherConfig {
    pub http: HttpConfig,
    log_dir: Option<PathBuf>,
}

/// Settings applied to both page requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Seconds before a request is abandoned.
    pub timeout: u64,
    pub user_agent: String,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            system_proxy: true,
        }
    }
}

impl FetcherConfig {
    /// Load configuration from `path` if given, else from the per-user
    /// default location when present, else built-in defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load_from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => Self::load(explicit),
            None => match default_config_path() {
                Some(candidate) if candidate.is_file() => Self::load(&candidate),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            FetchError::Config(format!("Failed to read {}: {err}", path.display()))
        })?;
        let config: Self = toml::from_str(&raw).map_err(|err| {
            FetchError::Config(format!("Failed to parse {}: {err}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.http.timeout == 0 {
            return Err(FetchError::Config("http.timeout must be at least 1 second".into()));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(FetchError::Config("http.user_agent must not be empty".into()));
        }
        Ok(())
    }

    /// Directory for session log files; `None` disables file logging.
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
