//! Jira REST API v2 request and response payloads.

use serde::{Deserialize, Serialize};

use crate::tracker::domain::{
    CreatedIssue, IssueId, IssueKey, NewIssueFields, StatusId, TrackedIssue, TrackerUser,
};

/// Fields requested from search and issue endpoints.
pub const ISSUE_FIELDS: &str = "summary,description,status";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraMyself {
    pub email_address: Option<String>,
    pub display_name: Option<String>,
}

impl From<JiraMyself> for TrackerUser {
    fn from(value: JiraMyself) -> Self {
        Self {
            email_address: value.email_address.unwrap_or_default(),
            display_name: value.display_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JiraSearchResponse {
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

#[derive(Debug, Deserialize)]
pub struct JiraIssue {
    pub id: String,
    pub key: String,
    pub fields: JiraIssueFields,
}

#[derive(Debug, Deserialize)]
pub struct JiraIssueFields {
    #[serde(default)]
    pub summary: String,
    pub description: Option<String>,
    pub status: JiraStatus,
}

#[derive(Debug, Deserialize)]
pub struct JiraStatus {
    pub id: String,
}

impl From<JiraIssue> for TrackedIssue {
    fn from(value: JiraIssue) -> Self {
        Self {
            id: IssueId::new(value.id),
            key: IssueKey::new(value.key),
            summary: value.fields.summary,
            description: value.fields.description,
            status: StatusId::new(value.fields.status.id),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JiraCreateIssueRequest<'a> {
    pub fields: JiraCreateFields<'a>,
}

#[derive(Debug, Serialize)]
pub struct JiraCreateFields<'a> {
    pub project: JiraProjectRef<'a>,
    pub issuetype: JiraIssueTypeRef<'a>,
    pub summary: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct JiraProjectRef<'a> {
    pub key: &'a str,
}

#[derive(Debug, Serialize)]
pub struct JiraIssueTypeRef<'a> {
    pub id: &'a str,
}

impl<'a> From<&'a NewIssueFields> for JiraCreateIssueRequest<'a> {
    fn from(value: &'a NewIssueFields) -> Self {
        Self {
            fields: JiraCreateFields {
                project: JiraProjectRef {
                    key: &value.project_key,
                },
                issuetype: JiraIssueTypeRef {
                    id: &value.issue_type_id,
                },
                summary: &value.summary,
                description: &value.description,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JiraCreateIssueResponse {
    pub id: String,
    pub key: String,
}

impl From<JiraCreateIssueResponse> for CreatedIssue {
    fn from(value: JiraCreateIssueResponse) -> Self {
        Self {
            id: IssueId::new(value.id),
            key: IssueKey::new(value.key),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JiraUpdateDescriptionRequest<'a> {
    pub fields: JiraDescriptionField<'a>,
}

#[derive(Debug, Serialize)]
pub struct JiraDescriptionField<'a> {
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct JiraCommentRequest<'a> {
    pub body: &'a str,
}

/// Builds the JQL selecting issues in `project_key` whose summary contains
/// `summary`.
#[must_use]
pub fn summary_jql(project_key: &str, summary: &str) -> String {
    let escaped = summary.replace('\\', "\\\\").replace('"', "\\\"");
    format!("project={project_key} AND summary ~ \"{escaped}\"")
}
