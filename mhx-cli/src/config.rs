use std::path::{Path, PathBuf};
use std::time::Duration;

use mediahuis_parser::extractor::default::{DEFAULT_TIMEOUT, DEFAULT_UA};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    cli::OutputFormat,
    error::{CliError, Result},
};

const APP_DIR: &str = "mhx";
const CONFIG_FILE: &str = "config.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub output_format: OutputFormat,
    pub colored: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: DEFAULT_UA.to_string(),
            output_format: OutputFormat::Pretty,
            colored: true,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| CliError::Config("no config directory on this platform".into()))
    }

    fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = Self::resolve_path(path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.show()?)?;
        Ok(())
    }

    pub fn reset(path: Option<&Path>) -> Result<()> {
        Self::default().save(path)
    }

    pub fn show(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Applies command line overrides.
    pub fn with_overrides(mut self, timeout: Option<u64>, user_agent: Option<String>) -> Self {
        if let Some(timeout) = timeout {
            self.timeout_secs = timeout;
        }
        if let Some(user_agent) = user_agent {
            self.user_agent = user_agent;
        }
        self
    }
}
