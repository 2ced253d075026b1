//! Board settings the reconciler is bound to.

use super::{NewIssueFields, StatusId, TrackerDomainError};
use serde::{Deserialize, Serialize};

/// Immutable description of the board issues are reconciled against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Tracker hostname used to select the `.netrc` entry.
    pub hostname: String,
    /// Project key issues live in.
    pub project_key: String,
    /// Status of the column new issues are created in.
    pub target_column: StatusId,
    /// Issue type used for created issues.
    pub issue_type_id: String,
    /// Pipeline name quoted in comments.
    pub pipeline_name: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            hostname: "mapaction.atlassian.net".to_owned(),
            project_key: "PIPET".to_owned(),
            target_column: StatusId::new("10110"),
            issue_type_id: "10096".to_owned(),
            pipeline_name: "MapChef".to_owned(),
        }
    }
}

impl BoardConfig {
    /// Checks that every setting is present.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyBoardSetting`] naming the first
    /// blank setting.
    pub fn validate(&self) -> Result<(), TrackerDomainError> {
        let settings = [
            ("hostname", self.hostname.as_str()),
            ("project_key", self.project_key.as_str()),
            ("target_column", self.target_column.as_str()),
            ("issue_type_id", self.issue_type_id.as_str()),
            ("pipeline_name", self.pipeline_name.as_str()),
        ];
        match settings.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(TrackerDomainError::EmptyBoardSetting(name)),
            None => Ok(()),
        }
    }

    /// Returns `true` when `status` is the column new issues land in.
    #[must_use]
    pub fn is_target_column(&self, status: &StatusId) -> bool {
        &self.target_column == status
    }

    /// Builds the creation field set for a new issue.
    #[must_use]
    pub fn new_issue_fields(&self, summary: &str, description: &str) -> NewIssueFields {
        NewIssueFields {
            project_key: self.project_key.clone(),
            issue_type_id: self.issue_type_id.clone(),
            summary: summary.to_owned(),
            description: description.to_owned(),
        }
    }
}
