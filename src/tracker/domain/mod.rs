//! Domain model for pipeline issue reconciliation.
//!
//! Value objects here describe what the pipeline reports and what the board
//! holds, keeping transport and storage concerns outside the domain boundary.

mod board;
mod comment;
mod credentials;
mod error;
mod issue;
mod referral;
mod severity;

pub use board::BoardConfig;
pub use comment::{ReconcileComment, format_timestamp};
pub use credentials::{Credentials, ServerUrl};
pub use error::TrackerDomainError;
pub use issue::{
    CreatedIssue, IssueId, IssueKey, IssueQuery, NewIssueFields, StatusId, TrackedIssue,
    TrackerUser,
};
pub use referral::{TaskReferral, TaskReport};
pub use severity::Severity;
