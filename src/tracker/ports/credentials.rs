//! Credential source port.

use crate::tracker::domain::{Credentials, TrackerDomainError};
use thiserror::Error;

/// Result type for credential lookups.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Supplies tracker credentials for a hostname.
pub trait CredentialSource: Send + Sync {
    /// Resolves the credentials stored for `hostname`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::SecretsUnavailable`] when no secrets store
    /// can be loaded and [`CredentialError::UnknownHost`] when the store has
    /// no entry for `hostname`.
    fn credentials_for(&self, hostname: &str) -> CredentialResult<Credentials>;
}

/// Errors returned by credential sources.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// No candidate secrets file could be read and parsed.
    #[error("Unable to locate or load suitable `.netrc` file for JIRA integration")]
    SecretsUnavailable,

    /// The secrets store has no entry for the hostname.
    #[error("JIRA Connection. Unable to find details for machine \"{0}\" `.netrc` file.")]
    UnknownHost(String),

    /// The matching entry lacks a required field.
    #[error("`.netrc` entry for machine \"{host}\" has no {field}")]
    IncompleteEntry {
        /// Hostname of the incomplete entry.
        host: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// The stored server URL is invalid.
    #[error(transparent)]
    InvalidEntry(#[from] TrackerDomainError),
}
