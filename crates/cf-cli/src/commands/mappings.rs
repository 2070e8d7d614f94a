use cf_core::responses::MappingQueryResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MappingsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cfl mappings`.
pub fn handle(args: &MappingsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = ctx.mappings()?;
    let between = match args.between.as_deref() {
        Some([a, b]) => Some((a.as_str(), b.as_str())),
        Some(_) => anyhow::bail!("--between takes exactly two framework ids"),
        None => None,
    };

    let Some(control_id) = args.control_id.as_deref() else {
        let (a, b) = between.ok_or_else(|| anyhow::anyhow!("a control id or --between is required"))?;
        return output(&registry.query_between(a, b), flags.format);
    };

    let mut response = MappingQueryResponse {
        control_id: control_id.to_string(),
        mappings: registry.query_by_control(control_id),
        counterparts: registry.counterparts(control_id),
    };
    if let Some((a, b)) = between {
        response.mappings.retain(|mapping| mapping.connects(a, b));
        response
            .counterparts
            .retain(|counterpart| counterpart.framework_id == a || counterpart.framework_id == b);
    }
    output(&response, flags.format)
}
