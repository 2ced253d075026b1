//! Task referrals handed over by pipeline steps.

use super::TrackerDomainError;

/// Identifies one unique unit of pipeline work that may need attention.
///
/// The summary must be unique within the board project: it is the key used
/// to find the tracked issue again on later runs.
pub trait TaskReferral: Send + Sync {
    /// Returns the unique summary used as the issue title.
    fn unique_summary(&self) -> String;

    /// Returns the free-text description rendered into the issue body.
    fn description(&self) -> String;
}

/// Plain task referral carrying a precomputed summary and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    summary: String,
    description: String,
}

impl TaskReport {
    /// Creates a referral with an empty description.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptySummary`] if the summary is empty.
    pub fn new(summary: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let raw_summary = summary.into();
        let normalized = raw_summary.trim();
        if normalized.is_empty() {
            return Err(TrackerDomainError::EmptySummary);
        }

        Ok(Self {
            summary: normalized.to_owned(),
            description: String::new(),
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl TaskReferral for TaskReport {
    fn unique_summary(&self) -> String {
        self.summary.clone()
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}
