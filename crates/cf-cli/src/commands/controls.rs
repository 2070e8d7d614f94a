use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ControlsCommands, ControlsCreateArgs};
use crate::commands::shared::inputs::analyze;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cfl controls`.
pub async fn handle(
    action: &ControlsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ControlsCommands::Create(args) => create(args, ctx, flags).await,
    }
}

async fn create(args: &ControlsCreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let analysis = analyze(ctx, &args.input)?;
    let plan = analysis.plan(&ctx.task_options(&[]))?;

    let sink = ctx.control_sink()?;
    let response = cf_store::persist_controls(&sink, &plan.controls).await?;
    output(&response, flags.format)
}
