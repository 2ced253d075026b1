//! Tracker account credentials.

use super::TrackerDomainError;
use std::fmt;

/// Base URL of the tracker server, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerUrl(String);

impl ServerUrl {
    /// Creates a validated server URL.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidServerUrl`] unless the value is an
    /// `http` or `https` URL with a host part.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let raw = value.into();
        let normalized = raw.trim().trim_end_matches('/');
        let host = normalized
            .strip_prefix("https://")
            .or_else(|| normalized.strip_prefix("http://"));
        let is_valid = host.is_some_and(|rest| {
            !rest.is_empty() && !rest.starts_with('/') && !rest.chars().any(char::is_whitespace)
        });

        if !is_valid {
            return Err(TrackerDomainError::InvalidServerUrl(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the URL as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins an absolute API path onto the server URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl fmt::Display for ServerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Username, server and API key used to open a tracker session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    server: ServerUrl,
    api_key: String,
}

impl Credentials {
    /// Creates credentials from validated parts.
    #[must_use]
    pub fn new(username: impl Into<String>, server: ServerUrl, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            server,
            api_key: api_key.into(),
        }
    }

    /// Returns the account username (an e-mail address for Jira Cloud).
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the tracker server URL.
    #[must_use]
    pub const fn server(&self) -> &ServerUrl {
        &self.server
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("server", &self.server)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
