use std::collections::BTreeSet;

use anyhow::bail;
use cf_core::entities::TaskSpec;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{TasksCommands, TasksCreateArgs};
use crate::commands::shared::inputs::analyze;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cfl tasks`.
pub async fn handle(action: &TasksCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TasksCommands::Create(args) => create(args, ctx, flags).await,
    }
}

async fn create(args: &TasksCreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let analysis = analyze(ctx, &args.plan.input)?;
    let plan = analysis.plan(&ctx.task_options(&args.plan.assignees))?;
    let specs = select(plan.tasks, &args.only)?;

    let sink = ctx.task_sink()?;
    let outcome = cf_store::create_tasks(&sink, &specs).await;
    output(&outcome, flags.format)?;

    if !outcome.is_complete() {
        let retry = outcome
            .failures
            .iter()
            .map(|failure| format!("--only {}", failure.gap_id))
            .collect::<Vec<_>>()
            .join(" ");
        bail!(
            "{} of {} tasks failed; retry with: cfl tasks create -a {} {retry}",
            outcome.failures.len(),
            specs.len(),
            args.plan.input.assessment.display()
        );
    }
    Ok(())
}

/// Keep only the specs whose gap id is in `only`; all of them when `only` is empty.
fn select(specs: Vec<TaskSpec>, only: &[String]) -> anyhow::Result<Vec<TaskSpec>> {
    if only.is_empty() {
        return Ok(specs);
    }

    let known: BTreeSet<&str> = specs.iter().map(|spec| spec.gap_id.as_str()).collect();
    let unknown: Vec<&str> = only
        .iter()
        .map(String::as_str)
        .filter(|gap_id| !known.contains(gap_id))
        .collect();
    if !unknown.is_empty() {
        bail!("unknown gap id(s): {}", unknown.join(", "));
    }

    let wanted: BTreeSet<&str> = only.iter().map(String::as_str).collect();
    Ok(specs
        .into_iter()
        .filter(|spec| wanted.contains(spec.gap_id.as_str()))
        .collect())
}
