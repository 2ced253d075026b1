//! Error types for tracker domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing tracker domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerDomainError {
    /// The task summary is empty after trimming.
    #[error("task summary must not be empty")]
    EmptySummary,

    /// A board setting is empty after trimming.
    #[error("board setting '{0}' must not be empty")]
    EmptyBoardSetting(&'static str),

    /// The severity name or level is not recognised.
    #[error("unknown severity: {0}")]
    UnknownSeverity(String),

    /// The tracker server URL cannot be parsed.
    #[error("invalid tracker server URL '{0}'")]
    InvalidServerUrl(String),
}
