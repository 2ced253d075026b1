//! Jira REST API v2 adapter for the issue tracker port.
//!
//! Requests use HTTP basic authentication with the account e-mail address
//! and an API token. The server URL comes from the credentials, so one
//! client can talk to whichever site the secrets file points at.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::models::{
    ISSUE_FIELDS, JiraCommentRequest, JiraCreateIssueRequest, JiraCreateIssueResponse,
    JiraDescriptionField, JiraIssue, JiraMyself, JiraSearchResponse,
    JiraUpdateDescriptionRequest, summary_jql,
};
use crate::tracker::{
    domain::{
        CreatedIssue, Credentials, IssueId, IssueKey, IssueQuery, NewIssueFields, TrackedIssue,
        TrackerUser,
    },
    ports::{IssueTracker, IssueTrackerError, IssueTrackerResult},
};

const API_ROOT: &str = "rest/api/2";
const SESSION_PATH: &str = "rest/auth/1/session";

/// Issue tracker adapter speaking to a Jira site over HTTP.
#[derive(Debug, Default)]
pub struct JiraRestClient {
    http: Client,
    session: RwLock<Option<Credentials>>,
}

impl JiraRestClient {
    /// Creates a client with a default HTTP configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_http_client(Client::new())
    }

    /// Creates a client over a preconfigured HTTP client.
    #[must_use]
    pub fn with_http_client(http: Client) -> Self {
        Self {
            http,
            session: RwLock::new(None),
        }
    }

    async fn request(&self, method: Method, path: &str) -> IssueTrackerResult<RequestBuilder> {
        let session = self.session.read().await;
        let credentials = session.as_ref().ok_or(IssueTrackerError::NotAuthenticated)?;
        Ok(authorized(&self.http, method, credentials, path))
    }
}

fn authorized(
    http: &Client,
    method: Method,
    credentials: &Credentials,
    path: &str,
) -> RequestBuilder {
    http.request(method, credentials.server().join(path))
        .basic_auth(credentials.username(), Some(credentials.api_key()))
        .header(reqwest::header::ACCEPT, "application/json")
}

async fn send(operation: &'static str, request: RequestBuilder) -> IssueTrackerResult<Response> {
    let response = request.send().await.map_err(IssueTrackerError::transport)?;
    if response.status().is_success() {
        return Ok(response);
    }
    Err(rejected(operation, response).await)
}

async fn rejected(operation: &'static str, response: Response) -> IssueTrackerError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    IssueTrackerError::Rejected {
        operation,
        status,
        body,
    }
}

async fn decode<T: DeserializeOwned>(
    operation: &'static str,
    response: Response,
) -> IssueTrackerResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| IssueTrackerError::Decode {
            operation,
            reason: err.to_string(),
        })
}

#[async_trait]
impl IssueTracker for JiraRestClient {
    async fn authenticate(&self, credentials: &Credentials) -> IssueTrackerResult<TrackerUser> {
        let request = authorized(
            &self.http,
            Method::GET,
            credentials,
            &format!("{API_ROOT}/myself"),
        );
        let response = send("authenticate", request).await?;
        let myself: JiraMyself = decode("authenticate", response).await?;
        *self.session.write().await = Some(credentials.clone());
        tracing::debug!(
            server = %credentials.server(),
            email = ?myself.email_address,
            display_name = ?myself.display_name,
            "authenticated with Jira"
        );
        Ok(myself.into())
    }

    async fn search_issues(
        &self,
        query: &IssueQuery,
        max_results: u32,
    ) -> IssueTrackerResult<Vec<TrackedIssue>> {
        let jql = summary_jql(&query.project_key, &query.summary);
        let limit = max_results.to_string();
        let request = self
            .request(Method::GET, &format!("{API_ROOT}/search"))
            .await?
            .query(&[
                ("jql", jql.as_str()),
                ("maxResults", limit.as_str()),
                ("fields", ISSUE_FIELDS),
            ]);
        let response = send("search_issues", request).await?;
        let found: JiraSearchResponse = decode("search_issues", response).await?;
        Ok(found.issues.into_iter().map(TrackedIssue::from).collect())
    }

    async fn create_issue(&self, fields: &NewIssueFields) -> IssueTrackerResult<CreatedIssue> {
        let request = self
            .request(Method::POST, &format!("{API_ROOT}/issue"))
            .await?
            .json(&JiraCreateIssueRequest::from(fields));
        let response = send("create_issue", request).await?;
        let created: JiraCreateIssueResponse = decode("create_issue", response).await?;
        Ok(created.into())
    }

    async fn update_issue_description(
        &self,
        issue: &IssueId,
        description: &str,
    ) -> IssueTrackerResult<()> {
        let request = self
            .request(Method::PUT, &format!("{API_ROOT}/issue/{issue}"))
            .await?
            .json(&JiraUpdateDescriptionRequest {
                fields: JiraDescriptionField { description },
            });
        send("update_issue_description", request).await?;
        Ok(())
    }

    async fn add_comment(&self, issue: &IssueId, body: &str) -> IssueTrackerResult<()> {
        let request = self
            .request(Method::POST, &format!("{API_ROOT}/issue/{issue}/comment"))
            .await?
            .json(&JiraCommentRequest { body });
        send("add_comment", request).await?;
        Ok(())
    }

    async fn get_issue(&self, key: &IssueKey) -> IssueTrackerResult<Option<TrackedIssue>> {
        let request = self
            .request(Method::GET, &format!("{API_ROOT}/issue/{key}"))
            .await?
            .query(&[("fields", ISSUE_FIELDS)]);
        let response = request.send().await.map_err(IssueTrackerError::transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(rejected("get_issue", response).await);
        }
        let issue: JiraIssue = decode("get_issue", response).await?;
        Ok(Some(issue.into()))
    }

    async fn end_session(&self) -> IssueTrackerResult<()> {
        let Some(credentials) = self.session.write().await.take() else {
            return Ok(());
        };
        let request = authorized(&self.http, Method::DELETE, &credentials, SESSION_PATH);
        let response = request.send().await.map_err(IssueTrackerError::transport)?;
        let status = response.status();
        if status.is_success()
            || status == StatusCode::UNAUTHORIZED
            || status == StatusCode::NOT_FOUND
        {
            tracing::debug!(status = status.as_u16(), "Jira session ended");
            return Ok(());
        }
        Err(rejected("end_session", response).await)
    }
}
