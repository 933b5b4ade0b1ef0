//! Core runtime configuration.
//!
//! # Responsibility
//! - Carry start-up knobs for the shell, session store and logging.
//! - Load them from JSON with every field defaulted.
//!
//! # Invariants
//! - A validated config has a non-blank default branch.
//! - A validated config has a non-zero toast delay.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BRANCH: &str = "Headquarters";
pub const DEFAULT_TOAST_TTL_MS: u64 = 4000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Filled into login candidates that carry no branch.
    pub default_branch: String,
    /// Branch choices offered by the settings screen.
    pub branches: Vec<String>,
    pub toast_ttl_ms: u64,
    /// Session database file. `None` keeps the session in memory only.
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    /// Absolute directory for rolling logs. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_branch: DEFAULT_BRANCH.to_string(),
            branches: vec![DEFAULT_BRANCH.to_string()],
            toast_ttl_ms: DEFAULT_TOAST_TTL_MS,
            db_path: None,
            log_level: None,
            log_dir: None,
        }
    }
}

impl CoreConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_branch.trim().is_empty() {
            return Err(ConfigError::Invalid("default_branch must not be blank"));
        }
        if self.toast_ttl_ms == 0 {
            return Err(ConfigError::Invalid("toast_ttl_ms must be greater than zero"));
        }
        Ok(())
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    /// Branch choices with the default branch guaranteed first.
    pub fn branch_choices(&self) -> Vec<String> {
        let mut choices = vec![self.default_branch.clone()];
        for branch in &self.branches {
            let branch = branch.trim();
            if !branch.is_empty() && !choices.iter().any(|known| known == branch) {
                choices.push(branch.to_string());
            }
        }
        choices
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}
