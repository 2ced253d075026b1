//! Adapter implementations for tracker ports.

pub mod jira;
pub mod memory;
pub mod netrc;
