//! Service layer reconciling pipeline failures with tracked issues.

use crate::tracker::{
    domain::{
        BoardConfig, IssueKey, IssueQuery, ReconcileComment, Severity, TaskReferral,
        TrackedIssue, TrackerDomainError, TrackerUser, format_timestamp,
    },
    ports::{CredentialError, CredentialSource, IssueTracker, IssueTrackerError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Number of search results requested; two are enough to detect duplicates.
const SEARCH_LIMIT: u32 = 2;

/// Service-level errors for issue reconciliation.
#[derive(Debug, Error)]
pub enum ReconcilerError {
    /// Board settings are invalid.
    #[error(transparent)]
    Domain(#[from] TrackerDomainError),

    /// Credentials could not be resolved.
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// The tracker authenticated a different account than configured.
    #[error(
        "JIRA Connection. Unable to authenticate with JIRA as \"{expected}\" (tracker reports \
         \"{actual}\"). Please check details in `.netrc` file."
    )]
    IdentityMismatch {
        /// Username from the credentials.
        expected: String,
        /// Identity reported by the tracker.
        actual: String,
    },

    /// More than one issue carries the same unique summary.
    #[error(
        "More than one JIRA Issue found with the summary \"{summary}\". This suggests that \
         additional issues have been raised manually on the board \"{project}\". Please ensure \
         that there is exactly one issue with this summary, by deleting those which have not \
         been created by the user \"{user}\""
    )]
    DuplicateIssues {
        /// Duplicated summary.
        summary: String,
        /// Project key searched.
        project: String,
        /// Account the reconciler runs as.
        user: String,
    },

    /// Tracker operation failed.
    #[error(transparent)]
    Tracker(#[from] IssueTrackerError),
}

/// Result type for reconciliation operations.
pub type ReconcilerResult<T> = Result<T, ReconcilerError>;

/// What a call to [`IssueReconciler::handle`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No task referral was supplied.
    NoReferral,
    /// The signal was not actionable; nothing changed.
    Ignored,
    /// A new issue was created.
    Created {
        /// Key of the created issue.
        key: IssueKey,
    },
    /// An existing issue was annotated.
    Updated {
        /// Key of the updated issue.
        key: IssueKey,
        /// Whether the description was overwritten.
        description_changed: bool,
        /// Comments posted, in order.
        comments_posted: Vec<ReconcileComment>,
    },
}

/// Keeps one tracked issue per failing pipeline task.
///
/// Created with [`IssueReconciler::connect`], which authenticates against
/// the tracker; release the session with [`IssueReconciler::close`].
pub struct IssueReconciler<T, C>
where
    T: IssueTracker,
    C: Clock + Send + Sync,
{
    config: BoardConfig,
    tracker: Arc<T>,
    clock: Arc<C>,
    identity: TrackerUser,
}

impl<T, C> IssueReconciler<T, C>
where
    T: IssueTracker,
    C: Clock + Send + Sync,
{
    /// Resolves credentials, opens a tracker session and checks that the
    /// tracker authenticated the configured account.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::Credentials`] when no usable credentials
    /// exist for the board hostname, [`ReconcilerError::IdentityMismatch`]
    /// when the authenticated account differs from the credential username,
    /// and [`ReconcilerError::Tracker`] when authentication fails.
    pub async fn connect(
        config: BoardConfig,
        credentials: &dyn CredentialSource,
        tracker: Arc<T>,
        clock: Arc<C>,
    ) -> ReconcilerResult<Self> {
        config.validate()?;
        let resolved = credentials
            .credentials_for(&config.hostname)
            .inspect_err(|err| tracing::error!(hostname = %config.hostname, "{err}"))?;

        let identity = tracker.authenticate(&resolved).await?;
        if identity.email_address != resolved.username() {
            let err = ReconcilerError::IdentityMismatch {
                expected: resolved.username().to_owned(),
                actual: identity.email_address,
            };
            tracing::error!("{err}");
            if let Err(end_err) = tracker.end_session().await {
                tracing::warn!(error = %end_err, "failed to end rejected tracker session");
            }
            return Err(err);
        }

        tracing::debug!(
            user = %identity.email_address,
            project = %config.project_key,
            "tracker session established"
        );
        Ok(Self {
            config,
            tracker,
            clock,
            identity,
        })
    }

    /// Returns the authenticated tracker account.
    #[must_use]
    pub const fn identity(&self) -> &TrackerUser {
        &self.identity
    }

    /// Returns the board settings.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Reconciles one pipeline signal with the board.
    ///
    /// Creates an issue for an actionable signal with no tracked issue,
    /// annotates the tracked issue when one exists, and otherwise does
    /// nothing. `message` is only logged.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::DuplicateIssues`] when the summary matches
    /// more than one issue, and [`ReconcilerError::Tracker`] when a tracker
    /// call fails.
    pub async fn handle(
        &self,
        severity: Severity,
        message: &str,
        referral: Option<&dyn TaskReferral>,
    ) -> ReconcilerResult<ReconcileOutcome> {
        tracing::debug!(%severity, signal = message, "handling pipeline signal");
        let Some(referral) = referral else {
            tracing::debug!("no task referral supplied; nothing to handle");
            return Ok(ReconcileOutcome::NoReferral);
        };

        let summary = referral.unique_summary();
        let description = referral.description();

        match self.find_issue(&summary).await? {
            Some(issue) => self.update_issue(&issue, &description, severity).await,
            None if severity.is_actionable() => self.create_issue(&summary, &description).await,
            None => {
                tracing::debug!(summary = %summary, %severity, "no issue and signal not actionable");
                Ok(ReconcileOutcome::Ignored)
            }
        }
    }

    /// Looks up the single issue carrying `summary` in the board project.
    ///
    /// Returns `Ok(None)` when no issue matches.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::DuplicateIssues`] when more than one issue
    /// matches, and [`ReconcilerError::Tracker`] when the search fails.
    pub async fn find_issue(&self, summary: &str) -> ReconcilerResult<Option<TrackedIssue>> {
        let query = IssueQuery {
            project_key: self.config.project_key.clone(),
            summary: summary.to_owned(),
        };
        let mut found = self.tracker.search_issues(&query, SEARCH_LIMIT).await?;
        if found.len() > 1 {
            return Err(ReconcilerError::DuplicateIssues {
                summary: summary.to_owned(),
                project: self.config.project_key.clone(),
                user: self.identity.email_address.clone(),
            });
        }
        Ok(found.pop())
    }

    /// Fetches an issue by key.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::Tracker`] when the lookup fails.
    pub async fn issue(&self, key: &IssueKey) -> ReconcilerResult<Option<TrackedIssue>> {
        Ok(self.tracker.get_issue(key).await?)
    }

    /// Ends the tracker session.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError::Tracker`] when the tracker refuses to end
    /// the session.
    pub async fn close(self) -> ReconcilerResult<()> {
        self.tracker.end_session().await?;
        tracing::debug!(user = %self.identity.email_address, "tracker session closed");
        Ok(())
    }

    async fn create_issue(
        &self,
        summary: &str,
        description: &str,
    ) -> ReconcilerResult<ReconcileOutcome> {
        let fields = self.config.new_issue_fields(summary, description);
        let created = self.tracker.create_issue(&fields).await?;
        tracing::info!(key = %created.key, summary, "created tracked issue");
        Ok(ReconcileOutcome::Created { key: created.key })
    }

    async fn update_issue(
        &self,
        issue: &TrackedIssue,
        description: &str,
        severity: Severity,
    ) -> ReconcilerResult<ReconcileOutcome> {
        if !severity.is_actionable() {
            tracing::debug!(key = %issue.key, %severity, "issue exists but signal not actionable");
            return Ok(ReconcileOutcome::Ignored);
        }

        let description_changed = issue.description_differs(description);
        if description_changed {
            self.tracker
                .update_issue_description(&issue.id, description)
                .await?;
            tracing::debug!(key = %issue.key, "description updated");
        }

        let timestamp = format_timestamp(self.clock.utc());
        let in_target_column = self.config.is_target_column(&issue.status);
        let mut comments = Vec::with_capacity(2);

        if in_target_column {
            comments.push(ReconcileComment::StillCurrent);
        } else {
            comments.push(ReconcileComment::StillCurrentMoveToTodo);
            // TODO: transition the issue back to the to-do column once the
            // board's transition id is part of `BoardConfig`.
            tracing::debug!(key = %issue.key, status = %issue.status, "column transition skipped");
        }

        // An issue still in the target column also gets the resolved note.
        if in_target_column {
            comments.push(ReconcileComment::AppearsResolved);
        }

        for comment in &comments {
            let body = comment.render(&self.config.pipeline_name, &timestamp);
            self.tracker.add_comment(&issue.id, &body).await?;
        }
        tracing::info!(
            key = %issue.key,
            description_changed,
            comments = comments.len(),
            "updated tracked issue"
        );

        Ok(ReconcileOutcome::Updated {
            key: issue.key.clone(),
            description_changed,
            comments_posted: comments,
        })
    }
}
