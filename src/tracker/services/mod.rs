//! Application services for pipeline issue reconciliation.

mod reconciler;

pub use reconciler::{IssueReconciler, ReconcileOutcome, ReconcilerError, ReconcilerResult};
