//! Timestamped comments posted on tracked issues.

use chrono::{DateTime, Utc};

/// Renders a UTC instant the way comments quote it,
/// e.g. `2026-10-18 09:30:00 UTC+0000`.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S %Z%z").to_string()
}

/// Comment kinds posted while updating an existing issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReconcileComment {
    /// The issue sits in the new-issue column and the failure persists.
    StillCurrent,
    /// The issue left the new-issue column but the failure persists.
    StillCurrentMoveToTodo,
    /// The issue may have been fixed and needs a manual check.
    AppearsResolved,
}

impl ReconcileComment {
    /// Renders the comment body for a pipeline run at `timestamp`.
    #[must_use]
    pub fn render(self, pipeline_name: &str, timestamp: &str) -> String {
        match self {
            Self::StillCurrent => format!(
                "This Issue was still current when {pipeline_name} was run at {timestamp}"
            ),
            Self::StillCurrentMoveToTodo => format!(
                "This Issue was still current on {pipeline_name} run at {timestamp}. \
                 Moving the issue to the TODO column"
            ),
            Self::AppearsResolved => format!(
                "This Issue appeared to be resolved when {pipeline_name} was run at {timestamp}. \
                 Please manually check that the outputs are as expected and then close this Issue."
            ),
        }
    }
}
