//! Tracked issue value objects as exchanged with the board.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tracker-internal issue identifier (e.g. `10231`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(String);

impl IssueId {
    /// Wraps a tracker issue identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-facing issue key (e.g. `PIPET-12`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueKey(String);

impl IssueKey {
    /// Wraps an issue key.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Board column status identifier (e.g. `10110`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusId(String);

impl StatusId {
    /// Wraps a status identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the status identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a remote issue as returned by search or lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedIssue {
    /// Tracker-internal identifier.
    pub id: IssueId,
    /// Human-facing key.
    pub key: IssueKey,
    /// Issue summary (title).
    pub summary: String,
    /// Issue description, absent when never set.
    pub description: Option<String>,
    /// Current board column.
    pub status: StatusId,
}

impl TrackedIssue {
    /// Returns `true` when the stored description differs from `description`.
    #[must_use]
    pub fn description_differs(&self, description: &str) -> bool {
        self.description.as_deref() != Some(description)
    }
}

/// Search criteria for locating an issue by its unique summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// Project key the search is scoped to.
    pub project_key: String,
    /// Summary text to match.
    pub summary: String,
}

/// Field set submitted when creating an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssueFields {
    /// Project key.
    pub project_key: String,
    /// Issue type identifier.
    pub issue_type_id: String,
    /// Unique summary.
    pub summary: String,
    /// Description body.
    pub description: String,
}

/// Handle to an issue the tracker has just created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Tracker-internal identifier.
    pub id: IssueId,
    /// Human-facing key.
    pub key: IssueKey,
}

/// Identity of the authenticated tracker account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerUser {
    /// Account e-mail address; compared against the credential username.
    pub email_address: String,
    /// Display name, when the tracker reports one.
    pub display_name: Option<String>,
}
