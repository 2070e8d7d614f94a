use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => commands::analyze::handle(&args, ctx, flags),
        Commands::Gaps(args) => commands::gaps::handle(&args, ctx, flags),
        Commands::Plan(args) => commands::plan::handle(&args, ctx, flags),
        Commands::Tasks { action } => commands::tasks::handle(&action, ctx, flags).await,
        Commands::Controls { action } => commands::controls::handle(&action, ctx, flags).await,
        Commands::Evidence(args) => commands::evidence::handle(&args, ctx, flags),
        Commands::Mappings(args) => commands::mappings::handle(&args, ctx, flags),
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
