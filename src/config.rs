//! Layered application configuration.
//!
//! Precedence, lowest to highest:
//!
//! 1. Programmatic defaults (the production board)
//! 2. An optional YAML file
//! 3. Environment variables prefixed `MAPCHEF_TRACKER_`, nested with `__`
//!    (e.g. `MAPCHEF_TRACKER_BOARD__PROJECT_KEY=TEST`)

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogConfig;
use crate::tracker::domain::{BoardConfig, TrackerDomainError};

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "MAPCHEF_TRACKER_";

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Board the reconciler works against.
    pub board: BoardConfig,
    /// Logging output settings.
    pub logging: LogConfig,
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be merged or deserialised.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A board setting is invalid.
    #[error(transparent)]
    Board(#[from] TrackerDomainError),

    /// The log level is not recognised.
    #[error("invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

impl AppConfig {
    /// Loads configuration from defaults, `path` and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or the merged
    /// result is invalid.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(path))
    }

    /// Builds the layered figment without extracting it.
    #[must_use]
    pub fn figment(path: Option<&Utf8Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(file) = path {
            figment = figment.merge(Yaml::file(file.as_std_path()));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extracts and validates configuration from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction or validation fails.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.logging.level.clone()));
        }
        Ok(())
    }
}
