use anyhow::Context;
use cf_analysis::evidence::extract_evidence;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EvidenceArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cfl evidence`. Needs no framework catalog.
pub fn handle(args: &EvidenceArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let assessment = cf_store::load_assessment(&args.assessment)
        .with_context(|| format!("failed to load assessment {}", args.assessment.display()))?;
    let library = ctx.evidence_library(args.library.as_deref())?;

    let records = extract_evidence(&assessment, &library);
    tracing::debug!(
        assessment_id = %assessment.id,
        library = library.len(),
        records = records.len(),
        "extracted evidence"
    );
    output(&records, flags.format)
}
