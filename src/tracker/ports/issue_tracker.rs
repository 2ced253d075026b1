//! Issue tracker port used to read and mutate board issues.

use crate::tracker::domain::{
    CreatedIssue, Credentials, IssueId, IssueKey, IssueQuery, NewIssueFields, TrackedIssue,
    TrackerUser,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Result type for issue tracker operations.
pub type IssueTrackerResult<T> = Result<T, IssueTrackerError>;

/// Remote issue tracker contract.
///
/// Implementations hold at most one authenticated session. Every operation
/// other than [`IssueTracker::authenticate`] requires that session.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Opens a session and returns the identity the tracker authenticated.
    async fn authenticate(&self, credentials: &Credentials) -> IssueTrackerResult<TrackerUser>;

    /// Returns up to `max_results` issues matching the query, in tracker
    /// order.
    async fn search_issues(
        &self,
        query: &IssueQuery,
        max_results: u32,
    ) -> IssueTrackerResult<Vec<TrackedIssue>>;

    /// Creates an issue.
    async fn create_issue(&self, fields: &NewIssueFields) -> IssueTrackerResult<CreatedIssue>;

    /// Overwrites the description of an issue.
    async fn update_issue_description(
        &self,
        issue: &IssueId,
        description: &str,
    ) -> IssueTrackerResult<()>;

    /// Appends a comment to an issue.
    async fn add_comment(&self, issue: &IssueId, body: &str) -> IssueTrackerResult<()>;

    /// Fetches an issue by key.
    ///
    /// Returns `None` when the issue does not exist.
    async fn get_issue(&self, key: &IssueKey) -> IssueTrackerResult<Option<TrackedIssue>>;

    /// Ends the session. Ending a session that is already closed succeeds.
    async fn end_session(&self) -> IssueTrackerResult<()>;
}

/// Errors returned by issue tracker adapters.
#[derive(Debug, Clone, Error)]
pub enum IssueTrackerError {
    /// An operation was attempted without an open session.
    #[error("issue tracker session is not authenticated")]
    NotAuthenticated,

    /// The tracker answered with a non-success status.
    #[error("issue tracker rejected {operation} with status {status}: {body}")]
    Rejected {
        /// Operation name.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The tracker response could not be decoded.
    #[error("issue tracker returned an unreadable {operation} response: {reason}")]
    Decode {
        /// Operation name.
        operation: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// Network or client failure.
    #[error("issue tracker transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl IssueTrackerError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
