//! Port contracts for pipeline issue reconciliation.
//!
//! Ports define infrastructure-agnostic interfaces used by the reconciler.

pub mod credentials;
pub mod issue_tracker;

pub use credentials::{CredentialError, CredentialResult, CredentialSource};
pub use issue_tracker::{IssueTracker, IssueTrackerError, IssueTrackerResult};

#[cfg(test)]
pub use issue_tracker::MockIssueTracker;
