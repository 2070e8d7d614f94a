use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::commands::shared::inputs::analyze;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cfl analyze`.
pub fn handle(args: &AnalyzeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let analysis = analyze(ctx, &args.input)?;
    output(&analysis.flow, flags.format)
}
