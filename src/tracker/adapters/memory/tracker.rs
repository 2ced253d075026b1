//! In-memory issue tracker for reconciliation tests and dry runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::tracker::{
    domain::{
        CreatedIssue, Credentials, IssueId, IssueKey, IssueQuery, NewIssueFields, StatusId,
        TrackedIssue, TrackerUser,
    },
    ports::{IssueTracker, IssueTrackerError, IssueTrackerResult},
};

/// Issue stored by the in-memory tracker, comments included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredIssue {
    /// Project the issue belongs to.
    pub project_key: String,
    /// Issue snapshot.
    pub issue: TrackedIssue,
    /// Comment bodies in posting order.
    pub comments: Vec<String>,
}

/// Thread-safe in-memory issue tracker.
///
/// Clones share state, so a test can keep a handle and inspect the board
/// after the reconciler has run.
#[derive(Debug, Clone)]
pub struct InMemoryIssueTracker {
    state: Arc<RwLock<InMemoryTrackerState>>,
}

#[derive(Debug)]
struct InMemoryTrackerState {
    account_email: Option<String>,
    new_issue_status: StatusId,
    issues: Vec<StoredIssue>,
    next_id: u64,
    session_open: bool,
    sessions_ended: usize,
    mutations: usize,
}

impl InMemoryIssueTracker {
    /// Creates an empty tracker that authenticates any username as itself.
    #[must_use]
    pub fn new(new_issue_status: StatusId) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTrackerState {
                account_email: None,
                new_issue_status,
                issues: Vec::new(),
                next_id: 10_000,
                session_open: false,
                sessions_ended: 0,
                mutations: 0,
            })),
        }
    }

    /// Makes the tracker report `email` as the authenticated identity,
    /// whatever username is supplied.
    #[must_use]
    pub fn with_account_email(self, email: impl Into<String>) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.account_email = Some(email.into());
        }
        self
    }

    /// Adds an issue directly to the board without counting a mutation.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Transport`] if the state lock is poisoned.
    pub fn seed_issue(
        &self,
        project_key: &str,
        summary: &str,
        description: Option<&str>,
        status: StatusId,
    ) -> IssueTrackerResult<TrackedIssue> {
        let mut state = write_state(&self.state)?;
        let (id, key) = state.allocate(project_key);
        let issue = TrackedIssue {
            id,
            key,
            summary: summary.to_owned(),
            description: description.map(str::to_owned),
            status,
        };
        state.issues.push(StoredIssue {
            project_key: project_key.to_owned(),
            issue: issue.clone(),
            comments: Vec::new(),
        });
        Ok(issue)
    }

    /// Moves an issue to another column without counting a mutation.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Rejected`] when the issue is unknown.
    pub fn set_status(&self, key: &IssueKey, status: StatusId) -> IssueTrackerResult<()> {
        let mut state = write_state(&self.state)?;
        let stored = state
            .issues
            .iter_mut()
            .find(|stored| &stored.issue.key == key)
            .ok_or_else(|| not_found("set_status", key.as_str()))?;
        stored.issue.status = status;
        Ok(())
    }

    /// Returns every stored issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Transport`] if the state lock is poisoned.
    pub fn issues(&self) -> IssueTrackerResult<Vec<StoredIssue>> {
        Ok(read_state(&self.state)?.issues.clone())
    }

    /// Returns the comments posted on the issue with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Transport`] if the state lock is poisoned.
    pub fn comments(&self, key: &IssueKey) -> IssueTrackerResult<Vec<String>> {
        let state = read_state(&self.state)?;
        Ok(state
            .issues
            .iter()
            .find(|stored| &stored.issue.key == key)
            .map(|stored| stored.comments.clone())
            .unwrap_or_default())
    }

    /// Returns the number of create, update and comment calls served.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Transport`] if the state lock is poisoned.
    pub fn mutation_count(&self) -> IssueTrackerResult<usize> {
        Ok(read_state(&self.state)?.mutations)
    }

    /// Returns how many sessions have been ended.
    ///
    /// # Errors
    ///
    /// Returns [`IssueTrackerError::Transport`] if the state lock is poisoned.
    pub fn sessions_ended(&self) -> IssueTrackerResult<usize> {
        Ok(read_state(&self.state)?.sessions_ended)
    }
}

impl InMemoryTrackerState {
    fn allocate(&mut self, project_key: &str) -> (IssueId, IssueKey) {
        self.next_id += 1;
        let sequence = self
            .issues
            .iter()
            .filter(|stored| stored.project_key == project_key)
            .count()
            + 1;
        (
            IssueId::new(self.next_id.to_string()),
            IssueKey::new(format!("{project_key}-{sequence}")),
        )
    }

    fn ensure_session(&self) -> IssueTrackerResult<()> {
        if self.session_open {
            Ok(())
        } else {
            Err(IssueTrackerError::NotAuthenticated)
        }
    }

    fn issue_mut(
        &mut self,
        operation: &'static str,
        id: &IssueId,
    ) -> IssueTrackerResult<&mut StoredIssue> {
        self.issues
            .iter_mut()
            .find(|stored| &stored.issue.id == id)
            .ok_or_else(|| not_found(operation, id.as_str()))
    }
}

fn read_state(
    state: &RwLock<InMemoryTrackerState>,
) -> IssueTrackerResult<std::sync::RwLockReadGuard<'_, InMemoryTrackerState>> {
    state
        .read()
        .map_err(|err| IssueTrackerError::transport(std::io::Error::other(err.to_string())))
}

fn write_state(
    state: &RwLock<InMemoryTrackerState>,
) -> IssueTrackerResult<std::sync::RwLockWriteGuard<'_, InMemoryTrackerState>> {
    state
        .write()
        .map_err(|err| IssueTrackerError::transport(std::io::Error::other(err.to_string())))
}

fn not_found(operation: &'static str, reference: &str) -> IssueTrackerError {
    IssueTrackerError::Rejected {
        operation,
        status: 404,
        body: format!("issue {reference} does not exist"),
    }
}

#[async_trait]
impl IssueTracker for InMemoryIssueTracker {
    async fn authenticate(&self, credentials: &Credentials) -> IssueTrackerResult<TrackerUser> {
        let mut state = write_state(&self.state)?;
        state.session_open = true;
        let email_address = state
            .account_email
            .clone()
            .unwrap_or_else(|| credentials.username().to_owned());
        Ok(TrackerUser {
            email_address,
            display_name: None,
        })
    }

    async fn search_issues(
        &self,
        query: &IssueQuery,
        max_results: u32,
    ) -> IssueTrackerResult<Vec<TrackedIssue>> {
        let state = read_state(&self.state)?;
        state.ensure_session()?;
        let needle = query.summary.to_lowercase();
        Ok(state
            .issues
            .iter()
            .filter(|stored| stored.project_key == query.project_key)
            .filter(|stored| stored.issue.summary.to_lowercase().contains(&needle))
            .take(usize::try_from(max_results).unwrap_or(usize::MAX))
            .map(|stored| stored.issue.clone())
            .collect())
    }

    async fn create_issue(&self, fields: &NewIssueFields) -> IssueTrackerResult<CreatedIssue> {
        let mut state = write_state(&self.state)?;
        state.ensure_session()?;
        let (id, key) = state.allocate(&fields.project_key);
        let status = state.new_issue_status.clone();
        state.issues.push(StoredIssue {
            project_key: fields.project_key.clone(),
            issue: TrackedIssue {
                id: id.clone(),
                key: key.clone(),
                summary: fields.summary.clone(),
                description: Some(fields.description.clone()),
                status,
            },
            comments: Vec::new(),
        });
        state.mutations += 1;
        Ok(CreatedIssue { id, key })
    }

    async fn update_issue_description(
        &self,
        issue: &IssueId,
        description: &str,
    ) -> IssueTrackerResult<()> {
        let mut state = write_state(&self.state)?;
        state.ensure_session()?;
        state.issue_mut("update_issue_description", issue)?.issue.description =
            Some(description.to_owned());
        state.mutations += 1;
        Ok(())
    }

    async fn add_comment(&self, issue: &IssueId, body: &str) -> IssueTrackerResult<()> {
        let mut state = write_state(&self.state)?;
        state.ensure_session()?;
        state
            .issue_mut("add_comment", issue)?
            .comments
            .push(body.to_owned());
        state.mutations += 1;
        Ok(())
    }

    async fn get_issue(&self, key: &IssueKey) -> IssueTrackerResult<Option<TrackedIssue>> {
        let state = read_state(&self.state)?;
        state.ensure_session()?;
        Ok(state
            .issues
            .iter()
            .find(|stored| &stored.issue.key == key)
            .map(|stored| stored.issue.clone()))
    }

    async fn end_session(&self) -> IssueTrackerResult<()> {
        let mut state = write_state(&self.state)?;
        if state.session_open {
            state.session_open = false;
            state.sessions_ended += 1;
        }
        Ok(())
    }
}
