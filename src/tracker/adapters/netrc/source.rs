//! `.netrc`-backed credential source.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use super::parser::Netrc;
use crate::tracker::{
    domain::{Credentials, ServerUrl},
    ports::{CredentialError, CredentialResult, CredentialSource},
};

/// Environment variable naming an explicit `.netrc` path.
pub const NETRC_OVERRIDE_ENV: &str = "MAPCHEF_NETRC";

const NETRC_FILE_NAME: &str = ".netrc";

/// Reads credentials from the first loadable `.netrc` candidate.
///
/// Each entry maps `login` to the username, `account` to the tracker server
/// URL and `password` to the API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetrcCredentialSource {
    candidates: Vec<Utf8PathBuf>,
}

impl NetrcCredentialSource {
    /// Creates a source searching `candidates` in order.
    #[must_use]
    pub const fn new(candidates: Vec<Utf8PathBuf>) -> Self {
        Self { candidates }
    }

    /// Creates a source from the process environment: `$HOME/.netrc`,
    /// `$USERPROFILE/.netrc`, then `$MAPCHEF_NETRC`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates a source using `lookup` to read environment variables.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let home_candidates = ["HOME", "USERPROFILE"]
            .into_iter()
            .filter_map(|name| lookup(name))
            .filter(|dir| !dir.is_empty())
            .map(|dir| Utf8PathBuf::from(dir).join(NETRC_FILE_NAME));
        let override_candidate = lookup(NETRC_OVERRIDE_ENV)
            .filter(|path| !path.is_empty())
            .map(Utf8PathBuf::from);
        Self::new(home_candidates.chain(override_candidate).collect())
    }

    /// Returns the candidate paths in search order.
    #[must_use]
    pub fn candidates(&self) -> &[Utf8PathBuf] {
        &self.candidates
    }

    /// Loads the first candidate that can be read and parsed.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::SecretsUnavailable`] when every candidate
    /// is missing, unreadable or malformed.
    pub fn load(&self) -> CredentialResult<Netrc> {
        for path in &self.candidates {
            let contents = match read_file(path) {
                Ok(contents) => contents,
                Err(err) => {
                    tracing::trace!(path = %path, error = %err, "netrc candidate unavailable");
                    continue;
                }
            };
            match Netrc::parse(&contents) {
                Ok(netrc) => {
                    tracing::debug!(path = %path, "loaded netrc secrets");
                    return Ok(netrc);
                }
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "ignoring malformed netrc file");
                }
            }
        }
        Err(CredentialError::SecretsUnavailable)
    }
}

impl CredentialSource for NetrcCredentialSource {
    fn credentials_for(&self, hostname: &str) -> CredentialResult<Credentials> {
        let netrc = self.load()?;
        let entry = netrc
            .authenticators(hostname)
            .ok_or_else(|| CredentialError::UnknownHost(hostname.to_owned()))?;

        let missing = |field| CredentialError::IncompleteEntry {
            host: hostname.to_owned(),
            field,
        };
        let username = entry.login.as_deref().ok_or_else(|| missing("login"))?;
        let account = entry.account.as_deref().ok_or_else(|| missing("account"))?;
        let api_key = entry.password.as_deref().ok_or_else(|| missing("password"))?;

        Ok(Credentials::new(username, ServerUrl::new(account)?, api_key))
    }
}

fn read_file(path: &Utf8Path) -> std::io::Result<String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("path must include a file name"))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(file_name)
}
