//! When steps for issue reconciliation BDD scenarios.

use super::world::{ReconcileWorld, run_async};
use eyre::WrapErr;
use mapchef_tracker::tracker::domain::{Severity, TaskReport};
use rstest_bdd_macros::when;

#[when(r#"the pipeline reports "{severity}" for task "{summary}""#)]
fn pipeline_reports(
    world: &mut ReconcileWorld,
    severity: String,
    summary: String,
) -> Result<(), eyre::Report> {
    let severity: Severity = severity.parse().wrap_err("parse scenario severity")?;
    let referral = TaskReport::new(summary)
        .wrap_err("build task referral")?
        .with_description("Seeded by an earlier pipeline run");
    world.mutations_before = world.tracker.mutation_count().wrap_err("count mutations")?;

    let reconciler = run_async(world.connect()).wrap_err("connect reconciler")?;
    let result = run_async(reconciler.handle(severity, "scenario signal", Some(&referral)));
    run_async(reconciler.close()).wrap_err("close reconciler")?;
    world.last_result = Some(result);
    Ok(())
}
