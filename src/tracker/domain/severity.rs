//! Severity levels reported by pipeline steps.

use super::TrackerDomainError;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Severity of a pipeline signal.
///
/// Severities share their numeric values with conventional logging levels,
/// so a step may report either the name or the number. Equality and
/// ordering follow the numeric level: a step reporting `40` is
/// [`Severity::Error`], one reporting `25` keeps that raw level.
#[derive(Debug, Clone, Copy)]
pub enum Severity {
    /// Diagnostic detail.
    Debug,
    /// Informational signal; never actionable on its own.
    Info,
    /// Something looks wrong but the step completed.
    Warning,
    /// The step failed.
    Error,
    /// The step failed and the run cannot continue.
    Critical,
    /// A level between or beyond the named ones.
    Level(u8),
}

impl Severity {
    /// Highest level that is not actionable.
    pub const INFORMATIONAL: Self = Self::Info;

    /// Returns the numeric logging level.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Debug => 10,
            Self::Info => 20,
            Self::Warning => 30,
            Self::Error => 40,
            Self::Critical => 50,
            Self::Level(level) => level,
        }
    }

    /// Maps a numeric logging level to a severity, naming it when it matches
    /// a conventional level and keeping the raw number otherwise.
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            10 => Self::Debug,
            20 => Self::Info,
            30 => Self::Warning,
            40 => Self::Error,
            50 => Self::Critical,
            other => Self::Level(other),
        }
    }

    /// Returns `true` when the signal warrants a tracked issue.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        self.level() > Self::INFORMATIONAL.level()
    }
}

impl PartialEq for Severity {
    fn eq(&self, other: &Self) -> bool {
        self.level() == other.level()
    }
}

impl Eq for Severity {}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level().cmp(&other.level())
    }
}

impl Hash for Severity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.level().hash(state);
    }
}

impl FromStr for Severity {
    type Err = TrackerDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" | "fatal" => Ok(Self::Critical),
            other => other
                .parse::<u8>()
                .map(Self::from_level)
                .map_err(|_| TrackerDomainError::UnknownSeverity(value.to_owned())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Self::from_level(self.level()) {
            Self::Debug => f.write_str("debug"),
            Self::Info => f.write_str("info"),
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
            Self::Critical => f.write_str("critical"),
            Self::Level(level) => write!(f, "level {level}"),
        }
    }
}
