use anyhow::Context;
use cf_analysis::{AnalysisError, FrameworkProvider, TaskOptions, build_flow_for, synthesize_plan};
use cf_core::entities::{Flow, Framework};
use cf_core::responses::RemediationPlan;
use cf_store::DirectoryFrameworks;
use chrono::Utc;

use crate::cli::root_commands::AssessmentArgs;
use crate::context::AppContext;

/// One assessment analyzed against its framework.
pub struct Analysis {
    pub frameworks: DirectoryFrameworks,
    pub flow: Flow,
}

impl Analysis {
    /// The framework the flow was built against.
    pub fn framework(&self) -> anyhow::Result<&Framework> {
        self.frameworks
            .framework(&self.flow.framework_id)
            .ok_or_else(|| {
                AnalysisError::FrameworkNotFound {
                    framework_id: self.flow.framework_id.clone(),
                }
                .into()
            })
    }

    /// Synthesize tasks and control stubs for every gap, due dates counted from now.
    pub fn plan(&self, options: &TaskOptions) -> anyhow::Result<RemediationPlan> {
        let plan = synthesize_plan(&self.flow, self.framework()?, options, Utc::now())?;
        Ok(plan)
    }
}

/// Load the assessment and frameworks named by `args` and build the flow.
pub fn analyze(ctx: &AppContext, args: &AssessmentArgs) -> anyhow::Result<Analysis> {
    let assessment = cf_store::load_assessment(&args.assessment)
        .with_context(|| format!("failed to load assessment {}", args.assessment.display()))?;
    let frameworks = ctx.frameworks()?;

    let framework_id = args
        .framework
        .clone()
        .unwrap_or_else(|| assessment.framework_id.clone());
    if framework_id != assessment.framework_id {
        tracing::info!(
            assessment_id = %assessment.id,
            recorded = %assessment.framework_id,
            requested = %framework_id,
            "analyzing against a different framework than recorded"
        );
    }

    let flow = build_flow_for(&frameworks, &assessment, &framework_id).with_context(|| {
        format!(
            "failed to analyze assessment {} (known frameworks: {})",
            assessment.id,
            frameworks.framework_ids().join(", ")
        )
    })?;
    tracing::debug!(
        assessment_id = %flow.assessment_id,
        total_gaps = flow.total_gaps,
        critical = flow.critical_gaps,
        "built flow"
    );

    Ok(Analysis { frameworks, flow })
}
