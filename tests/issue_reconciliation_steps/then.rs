//! Then steps for issue reconciliation BDD scenarios.

use super::world::ReconcileWorld;
use eyre::WrapErr;
use mapchef_tracker::tracker::{domain::IssueKey, services::ReconcilerError};
use rstest_bdd_macros::then;

#[then("the number of tracked issues is {count:usize}")]
fn tracked_issue_count(world: &ReconcileWorld, count: usize) -> Result<(), eyre::Report> {
    let issues = world.tracker.issues().wrap_err("read board state")?;
    eyre::ensure!(
        issues.len() == count,
        "expected {count} tracked issues, found {}",
        issues.len()
    );
    Ok(())
}

#[then(r#"issue "{key}" has {count:usize} comments"#)]
fn issue_comment_count(
    world: &ReconcileWorld,
    key: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let comments = world
        .tracker
        .comments(&IssueKey::new(key.as_str()))
        .wrap_err("read comments")?;
    eyre::ensure!(
        comments.len() == count,
        "expected {count} comments on {key}, found {}",
        comments.len()
    );
    Ok(())
}

#[then(r#"the latest comment on "{key}" mentions "{text}""#)]
fn latest_comment_mentions(
    world: &ReconcileWorld,
    key: String,
    text: String,
) -> Result<(), eyre::Report> {
    let comments = world
        .tracker
        .comments(&IssueKey::new(key.as_str()))
        .wrap_err("read comments")?;
    let latest = comments
        .last()
        .ok_or_else(|| eyre::eyre!("issue {key} has no comments"))?;
    eyre::ensure!(
        latest.contains(&text),
        "latest comment on {key} does not mention {text:?}: {latest}"
    );
    eyre::ensure!(
        latest.contains("2026-10-18 09:30:00 UTC+0000"),
        "latest comment on {key} lacks the run timestamp: {latest}"
    );
    Ok(())
}

#[then("the board was not modified")]
fn board_not_modified(world: &ReconcileWorld) -> Result<(), eyre::Report> {
    let mutations = world.tracker.mutation_count().wrap_err("count mutations")?;
    eyre::ensure!(
        mutations == world.mutations_before,
        "expected no board changes, found {} new mutations",
        mutations - world.mutations_before
    );
    Ok(())
}

#[then("reconciliation fails with a duplicate issue error")]
fn duplicate_issue_error(world: &ReconcileWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing reconciliation result in scenario world"))?;
    if !matches!(result, Err(ReconcilerError::DuplicateIssues { .. })) {
        return Err(eyre::eyre!(
            "expected duplicate issue error, got {result:?}"
        ));
    }
    Ok(())
}
