//! Flow aggregation: one analysis run of an assessment against a framework.

use cf_core::entities::{Assessment, Flow, Framework, SeverityCounts};

use crate::error::AnalysisError;
use crate::gaps::extract_gaps;
use crate::provider::FrameworkProvider;

/// Build a flow from an already-resolved framework.
#[must_use]
pub fn assemble_flow(assessment: &Assessment, framework: &Framework) -> Flow {
    let gaps = extract_gaps(&assessment.id, framework, &assessment.responses);
    let counts = SeverityCounts::tally(&gaps);
    let total_gaps = gaps.len();
    let has_gaps = total_gaps > 0;

    Flow {
        assessment_id: assessment.id.clone(),
        framework_id: framework.id.clone(),
        gaps,
        total_gaps,
        critical_gaps: counts.critical,
        high_gaps: counts.high,
        can_create_tasks: has_gaps,
        can_create_controls: has_gaps,
        can_link_evidence: assessment.has_evidence(),
    }
}

/// Build a flow against the assessment's own framework.
///
/// # Errors
///
/// Returns `AnalysisError::FrameworkNotFound` if the provider has no
/// definition for `assessment.framework_id`.
pub fn build_flow<P>(provider: &P, assessment: &Assessment) -> Result<Flow, AnalysisError>
where
    P: FrameworkProvider + ?Sized,
{
    build_flow_for(provider, assessment, &assessment.framework_id)
}

/// Build a flow against an explicitly requested framework.
///
/// # Errors
///
/// Returns `AnalysisError::FrameworkNotFound` if the provider has no
/// definition for `framework_id`.
pub fn build_flow_for<P>(
    provider: &P,
    assessment: &Assessment,
    framework_id: &str,
) -> Result<Flow, AnalysisError>
where
    P: FrameworkProvider + ?Sized,
{
    let Some(framework) = provider.framework(framework_id) else {
        tracing::warn!(
            assessment_id = %assessment.id,
            framework_id,
            "framework lookup failed"
        );
        return Err(AnalysisError::FrameworkNotFound {
            framework_id: framework_id.to_string(),
        });
    };

    let flow = assemble_flow(assessment, framework);
    tracing::debug!(
        assessment_id = %flow.assessment_id,
        framework_id = %flow.framework_id,
        total_gaps = flow.total_gaps,
        critical_gaps = flow.critical_gaps,
        high_gaps = flow.high_gaps,
        "built flow"
    );
    Ok(flow)
}
