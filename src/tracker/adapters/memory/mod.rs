//! In-memory adapters.

mod tracker;

pub use tracker::{InMemoryIssueTracker, StoredIssue};
