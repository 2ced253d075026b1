//! Shared world state for issue reconciliation BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mapchef_tracker::tracker::{
    adapters::memory::InMemoryIssueTracker,
    domain::{BoardConfig, Credentials, ServerUrl},
    ports::{CredentialResult, CredentialSource},
    services::{IssueReconciler, ReconcileOutcome, ReconcilerError, ReconcilerResult},
};
use mockable::Clock;
use rstest::fixture;

/// Reconciler type used by the BDD world.
pub type WorldReconciler = IssueReconciler<InMemoryIssueTracker, ScenarioClock>;

/// Clock fixed at the scenario's pipeline run time.
pub struct ScenarioClock(DateTime<Utc>);

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Credentials for whichever host the board names.
pub struct ScenarioCredentials;

impl CredentialSource for ScenarioCredentials {
    fn credentials_for(&self, hostname: &str) -> CredentialResult<Credentials> {
        Ok(Credentials::new(
            "pipeline@example.org",
            ServerUrl::new(format!("https://{hostname}"))?,
            "api-token",
        ))
    }
}

/// Scenario world for issue reconciliation behaviour tests.
pub struct ReconcileWorld {
    /// Board settings.
    pub board: BoardConfig,
    /// Simulated board shared with every reconciler the scenario opens.
    pub tracker: InMemoryIssueTracker,
    /// Mutations recorded before the pipeline ran.
    pub mutations_before: usize,
    /// Result of the last reconciliation.
    pub last_result: Option<Result<ReconcileOutcome, ReconcilerError>>,
}

impl ReconcileWorld {
    /// Creates a world around an empty board.
    #[must_use]
    pub fn new() -> Self {
        let board = BoardConfig::default();
        let tracker = InMemoryIssueTracker::new(board.target_column.clone());
        Self {
            board,
            tracker,
            mutations_before: 0,
            last_result: None,
        }
    }

    /// Connects a reconciler running at 09:30 UTC on 18 October 2026.
    ///
    /// # Errors
    ///
    /// Returns the reconciler error when connecting fails.
    pub async fn connect(&self) -> ReconcilerResult<WorldReconciler> {
        let instant = Utc
            .with_ymd_and_hms(2026, 10, 18, 9, 30, 0)
            .single()
            .unwrap_or_default();
        IssueReconciler::connect(
            self.board.clone(),
            &ScenarioCredentials,
            Arc::new(self.tracker.clone()),
            Arc::new(ScenarioClock(instant)),
        )
        .await
    }
}

impl Default for ReconcileWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReconcileWorld {
    ReconcileWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
