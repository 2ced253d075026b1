//! Shared test helpers for in-memory reconciliation tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mapchef_tracker::tracker::{
    adapters::memory::InMemoryIssueTracker,
    domain::{BoardConfig, Credentials, ServerUrl, TaskReport},
    ports::{CredentialError, CredentialResult, CredentialSource},
    services::{IssueReconciler, ReconcilerResult},
};
use mockable::Clock;
use rstest::fixture;

/// Account every helper authenticates as.
pub const USERNAME: &str = "pipeline@example.org";

/// Reconciler type exercised by in-memory tests.
pub type TestReconciler = IssueReconciler<InMemoryIssueTracker, FixedClock>;

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Credential source that resolves only the default board host.
pub struct BoardCredentials;

impl CredentialSource for BoardCredentials {
    fn credentials_for(&self, hostname: &str) -> CredentialResult<Credentials> {
        if hostname != BoardConfig::default().hostname {
            return Err(CredentialError::UnknownHost(hostname.to_owned()));
        }
        Ok(Credentials::new(
            USERNAME,
            ServerUrl::new(format!("https://{hostname}"))?,
            "api-token",
        ))
    }
}

/// Provides the default board settings.
#[fixture]
pub fn board() -> BoardConfig {
    BoardConfig::default()
}

/// Provides an empty tracker whose new issues land in the target column.
#[fixture]
pub fn tracker(board: BoardConfig) -> InMemoryIssueTracker {
    InMemoryIssueTracker::new(board.target_column)
}

/// Returns a clock fixed at 09:30 UTC on the given October day.
#[must_use]
pub fn october(day: u32) -> FixedClock {
    let instant = Utc
        .with_ymd_and_hms(2026, 10, day, 9, 30, 0)
        .single()
        .expect("valid October instant");
    FixedClock(instant)
}

/// Connects a reconciler to `tracker` with the default board.
///
/// # Errors
///
/// Returns the reconciler error when connecting fails.
pub async fn connect(
    tracker: &InMemoryIssueTracker,
    clock: FixedClock,
) -> ReconcilerResult<TestReconciler> {
    IssueReconciler::connect(
        BoardConfig::default(),
        &BoardCredentials,
        Arc::new(tracker.clone()),
        Arc::new(clock),
    )
    .await
}

/// Builds a task referral with a description.
///
/// # Panics
///
/// Panics when `summary` is blank.
#[must_use]
pub fn referral(summary: &str, description: &str) -> TaskReport {
    TaskReport::new(summary)
        .expect("test summaries are never blank")
        .with_description(description)
}
