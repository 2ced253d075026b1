//! Repeated pipeline runs reconciled against one in-memory board.

use mapchef_tracker::tracker::{
    adapters::memory::InMemoryIssueTracker,
    domain::{IssueKey, Severity, StatusId},
    services::ReconcileOutcome,
};
use rstest::rstest;

use super::helpers::{connect, october, referral, tracker};

const SUMMARY: &str = "Admin boundary layer stale for MA0456";

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_runs_keep_a_single_issue(tracker: InMemoryIssueTracker) {
    for day in [18, 19, 20] {
        let reconciler = connect(&tracker, october(day)).await.expect("connect");
        reconciler
            .handle(
                Severity::Error,
                "layer stale",
                Some(&referral(SUMMARY, "Boundary data is older than 30 days")),
            )
            .await
            .expect("handle");
        reconciler.close().await.expect("close");
    }

    let issues = tracker.issues().expect("issues");
    assert_eq!(issues.len(), 1);
    // Created on the first run, two comments on each later run.
    assert_eq!(issues[0].comments.len(), 4);
    assert!(issues[0].comments[2].contains("2026-10-20 09:30:00 UTC+0000"));
    assert_eq!(tracker.sessions_ended().expect("count"), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn informational_run_after_failure_changes_nothing(tracker: InMemoryIssueTracker) {
    let first = connect(&tracker, october(18)).await.expect("connect");
    first
        .handle(Severity::Critical, "layer stale", Some(&referral(SUMMARY, "d")))
        .await
        .expect("handle");
    first.close().await.expect("close");
    let mutations = tracker.mutation_count().expect("count");

    let second = connect(&tracker, october(19)).await.expect("connect");
    let outcome = second
        .handle(Severity::Info, "layer fine", Some(&referral(SUMMARY, "d")))
        .await
        .expect("handle");

    assert_eq!(outcome, ReconcileOutcome::Ignored);
    assert_eq!(tracker.mutation_count().expect("count"), mutations);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn issue_moved_in_progress_then_seen_again(tracker: InMemoryIssueTracker) {
    let first = connect(&tracker, october(18)).await.expect("connect");
    let created = first
        .handle(Severity::Error, "layer stale", Some(&referral(SUMMARY, "d")))
        .await
        .expect("handle");
    assert_eq!(
        created,
        ReconcileOutcome::Created {
            key: IssueKey::new("PIPET-1")
        }
    );
    tracker
        .set_status(&IssueKey::new("PIPET-1"), StatusId::new("3"))
        .expect("move issue");

    let outcome = connect(&tracker, october(19))
        .await
        .expect("connect")
        .handle(Severity::Error, "layer stale", Some(&referral(SUMMARY, "d")))
        .await
        .expect("handle");

    assert!(matches!(
        outcome,
        ReconcileOutcome::Updated { description_changed: false, ref comments_posted, .. }
            if comments_posted.len() == 1
    ));
}
