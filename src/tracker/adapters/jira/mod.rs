//! Jira REST API adapter.

mod client;
mod models;

pub use client::JiraRestClient;
pub use models::summary_jql;
