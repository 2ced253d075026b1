//! MapChef tracker: pipeline failure reconciliation with a Jira board.
//!
//! This crate keeps exactly one tracked issue per failing map-production
//! task. A pipeline step reports a severity and a task referral; the
//! reconciler creates the issue on the first actionable failure and
//! annotates it with timestamped comments on later runs.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Value objects with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the tracker and secrets store
//! - **Adapters**: Jira REST, `.netrc`, and in-memory implementations
//!
//! # Modules
//!
//! - [`tracker`]: Issue reconciliation domain, ports, adapters and service
//! - [`config`]: Layered configuration loading
//! - [`logging`]: Structured logging setup

pub mod config;
pub mod logging;
pub mod tracker;
