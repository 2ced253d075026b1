//! Step definitions for issue reconciliation scenarios.

mod given;
mod then;
mod when;
pub mod world;
