use cf_core::entities::Gap;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{GapSort, GapsArgs};
use crate::commands::shared::inputs::analyze;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cfl gaps`.
pub fn handle(args: &GapsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(args.limit, flags.limit, ctx.config.general.default_limit);
    let analysis = analyze(ctx, &args.input)?;

    let mut gaps: Vec<&Gap> = match args.sort {
        GapSort::Traversal => analysis.flow.gaps.iter().collect(),
        GapSort::Severity => analysis.flow.gaps_by_severity(),
    };
    gaps.truncate(usize::try_from(limit)?);

    output(&gaps, flags.format)
}
