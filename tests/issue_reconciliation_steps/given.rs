//! Given steps for issue reconciliation BDD scenarios.

use super::world::ReconcileWorld;
use eyre::WrapErr;
use mapchef_tracker::tracker::domain::StatusId;
use rstest_bdd_macros::given;

#[given("an empty board")]
fn empty_board(world: &mut ReconcileWorld) -> Result<(), eyre::Report> {
    let issues = world.tracker.issues().wrap_err("read board state")?;
    eyre::ensure!(issues.is_empty(), "expected an empty board");
    Ok(())
}

#[given(r#"a tracked issue "{summary}" in column "{column}""#)]
fn tracked_issue_in_column(
    world: &mut ReconcileWorld,
    summary: String,
    column: String,
) -> Result<(), eyre::Report> {
    world
        .tracker
        .seed_issue(
            &world.board.project_key,
            &summary,
            Some("Seeded by an earlier pipeline run"),
            StatusId::new(column),
        )
        .wrap_err("seed tracked issue")?;
    Ok(())
}
