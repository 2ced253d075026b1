//! Pipeline failure reconciliation against an issue tracking board.
//!
//! A pipeline step that fails hands a task referral to the
//! [`services::IssueReconciler`], which makes sure exactly one tracked issue
//! exists for it on the board and annotates that issue on every later run.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
