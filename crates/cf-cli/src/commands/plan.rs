use crate::cli::GlobalFlags;
use crate::cli::root_commands::PlanArgs;
use crate::commands::shared::inputs::analyze;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cfl plan`. Nothing is written.
pub fn handle(args: &PlanArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let analysis = analyze(ctx, &args.input)?;
    let plan = analysis.plan(&ctx.task_options(&args.assignees))?;
    output(&plan, flags.format)
}
