//! Remediation artifact synthesis: gap → task specification and control stub.

use chrono::{DateTime, Utc};

use cf_core::entities::{ControlStub, Flow, Framework, Gap, TaskMetadata, TaskSpec};
use cf_core::enums::{ControlStatus, Impact, Severity, TaskStatus};
use cf_core::ids;
use cf_core::responses::RemediationPlan;

use crate::error::AnalysisError;
use crate::estimation;
use crate::gaps::{GapLocation, locate};
use crate::taxonomy;

/// Maximum length, in characters, of the question excerpt in a task title.
pub const TITLE_EXCERPT_CHARS: usize = 60;

const ELLIPSIS: &str = "...";

const REMEDIATION_PREAMBLE: &str = "Remediate the compliance gap identified during the assessment. \
     Implement the requirement below until it can be answered as fully implemented.";

/// Who a synthesized task is assigned to, and by whom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskOptions {
    pub assignees: Vec<String>,
    pub assigned_by: String,
}

/// Shorten `text` to at most [`TITLE_EXCERPT_CHARS`] characters, ending in
/// an ellipsis when anything was cut.
#[must_use]
pub fn truncate_excerpt(text: &str) -> String {
    if text.chars().count() <= TITLE_EXCERPT_CHARS {
        return text.to_string();
    }
    let keep = TITLE_EXCERPT_CHARS - ELLIPSIS.len();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

fn status_label(response: u8) -> &'static str {
    if response == 0 {
        "Not Implemented"
    } else {
        "Partially Implemented"
    }
}

const fn business_impact(severity: Severity) -> Impact {
    match severity {
        Severity::Critical => Impact::High,
        Severity::High => Impact::Medium,
        Severity::Medium | Severity::Low => Impact::Low,
    }
}

const fn risk_reduction_percent(severity: Severity) -> u8 {
    match severity {
        Severity::Critical => 30,
        Severity::High => 20,
        Severity::Medium | Severity::Low => 10,
    }
}

fn labelled(label: &str, name: &str, description: &str) -> String {
    if description.trim().is_empty() {
        format!("{label}: {name}")
    } else {
        format!("{label}: {name} - {description}")
    }
}

fn task_description(gap: &Gap, location: &GapLocation<'_>) -> String {
    let mut blocks = vec![
        REMEDIATION_PREAMBLE.to_string(),
        labelled("Section", &location.section.name, &location.section.description),
        labelled("Category", &location.category.name, &location.category.description),
        format!("Question: {}", location.question.text),
    ];

    if let Some(guidance) = location
        .question
        .guidance
        .as_deref()
        .filter(|guidance| !guidance.trim().is_empty())
    {
        blocks.push(format!("Guidance: {guidance}"));
    }

    if let Some(current) = gap.current_response {
        blocks.push(format!(
            "Current Status: {} → Target Status: Fully Implemented",
            status_label(current)
        ));
    }

    blocks.join("\n\n")
}

/// Build the task specification for one gap.
///
/// `now` is the synthesis time the due date is offset from.
#[must_use]
pub fn synthesize_task(
    gap: &Gap,
    location: &GapLocation<'_>,
    options: &TaskOptions,
    now: DateTime<Utc>,
) -> TaskSpec {
    let title = format!(
        "{} - {}: {}",
        location.section.name,
        location.category.name,
        truncate_excerpt(&location.question.text)
    );

    TaskSpec {
        gap_id: gap.gap_id.clone(),
        title,
        description: task_description(gap, location),
        priority: gap.severity,
        function_tag: taxonomy::map_to_function(&location.section.id, &location.section.name),
        category_id: gap.category_id.clone(),
        related_control_id: ids::control_id(&gap.gap_id),
        estimated_hours: estimation::estimate_hours(gap.severity, location.question.priority),
        due_date: estimation::due_date(gap.severity, now),
        status: TaskStatus::NotStarted,
        assignees: options.assignees.clone(),
        assigned_by: options.assigned_by.clone(),
        metadata: TaskMetadata {
            business_impact: business_impact(gap.severity),
            technical_complexity: Impact::Medium,
            risk_reduction_percent: risk_reduction_percent(gap.severity),
            compliance_impact: vec![location.framework.id.clone()],
        },
    }
}

/// Project a gap onto a control stub. Does not consult the estimation tables.
#[must_use]
pub fn synthesize_control(gap: &Gap, location: &GapLocation<'_>) -> ControlStub {
    ControlStub {
        control_id: ids::control_id(&gap.gap_id),
        name: format!("{}: {}", gap.question_id, truncate_excerpt(&location.question.text)),
        description: location.question.text.clone(),
        framework_id: location.framework.id.clone(),
        category_id: gap.category_id.clone(),
        priority: gap.severity,
        status: ControlStatus::NotImplemented,
        related_gap_id: gap.gap_id.clone(),
        related_question_id: gap.question_id.clone(),
    }
}

/// Synthesize tasks and controls for every gap in a flow, in gap order.
///
/// # Errors
///
/// Returns `AnalysisError::FrameworkMismatch` if the flow was built against
/// another framework, or `AnalysisError::GapNotInFramework` if a gap does not
/// resolve to a question.
pub fn synthesize_plan(
    flow: &Flow,
    framework: &Framework,
    options: &TaskOptions,
    now: DateTime<Utc>,
) -> Result<RemediationPlan, AnalysisError> {
    if flow.framework_id != framework.id {
        return Err(AnalysisError::FrameworkMismatch {
            flow_framework_id: flow.framework_id.clone(),
            framework_id: framework.id.clone(),
        });
    }

    let mut tasks = Vec::with_capacity(flow.gaps.len());
    let mut controls = Vec::with_capacity(flow.gaps.len());
    for gap in &flow.gaps {
        let location = locate(framework, gap).ok_or_else(|| AnalysisError::GapNotInFramework {
            gap_id: gap.gap_id.clone(),
            framework_id: framework.id.clone(),
        })?;
        tasks.push(synthesize_task(gap, &location, options, now));
        controls.push(synthesize_control(gap, &location));
    }

    Ok(RemediationPlan {
        assessment_id: flow.assessment_id.clone(),
        framework_id: flow.framework_id.clone(),
        tasks,
        controls,
    })
}
