//! Layered runtime configuration.
//!
//! # Responsibility
//! - Describe how to reach the album database and how to log.
//! - Merge defaults, an optional TOML file and `RECORDINGS_*` environment
//!   variables, in that order of increasing precedence.
//!
//! # Invariants
//! - A missing config file is not an error; defaults apply.
//! - Nested env keys use `__` as separator (`RECORDINGS_DATABASE__PATH`).

use crate::logging::default_log_level;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Env var naming the TOML file to load instead of `DEFAULT_CONFIG_FILE`.
pub const CONFIG_FILE_ENV: &str = "RECORDINGS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "recordings.toml";
pub const ENV_PREFIX: &str = "RECORDINGS_";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug)]
pub enum ConfigError {
    Load(figment::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Load(value)
    }
}

/// Connection settings for the album database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file. `None` opens a private in-memory database.
    pub path: Option<PathBuf>,
    /// Open without write access.
    pub read_only: bool,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout_ms: u64,
    /// Create the album table on open when it does not exist yet.
    pub create_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            read_only: false,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            create_schema: false,
        }
    }
}

impl DatabaseConfig {
    /// In-memory database with the album table created on open.
    pub fn in_memory() -> Self {
        Self {
            create_schema: true,
            ..Self::default()
        }
    }

    /// File-backed database expecting an existing album table.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.is_none()
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rotated log files. `None` logs to stderr.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads config from the file named by `RECORDINGS_CONFIG` (or
    /// `recordings.toml`) layered under `RECORDINGS_*` env vars.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(path)
    }

    /// Loads config from an explicit TOML file layered under env vars.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::figment(path).extract()?)
    }

    /// Provider chain used by `load_from`, exposed for callers that want to
    /// merge additional sources.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
