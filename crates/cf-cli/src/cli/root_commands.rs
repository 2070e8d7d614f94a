use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Analyze an assessment and print the aggregate flow.
    Analyze(AnalyzeArgs),
    /// List the gaps found in an assessment.
    Gaps(GapsArgs),
    /// Synthesize remediation tasks and control stubs without persisting them.
    Plan(PlanArgs),
    /// Remediation tasks.
    Tasks {
        #[command(subcommand)]
        action: TasksCommands,
    },
    /// Control stubs.
    Controls {
        #[command(subcommand)]
        action: ControlsCommands,
    },
    /// Normalize the evidence attached to an assessment.
    Evidence(EvidenceArgs),
    /// Look up cross-framework control mappings.
    Mappings(MappingsArgs),
    /// Print the JSON Schema for a record type, or validate a file against it.
    Schema(SchemaArgs),
}

/// Inputs shared by every command that analyzes an assessment.
#[derive(Clone, Debug, Args)]
pub struct AssessmentArgs {
    /// Exported assessment JSON file.
    #[arg(short, long)]
    pub assessment: PathBuf,

    /// Analyze against this framework instead of the assessment's own.
    #[arg(long)]
    pub framework: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: AssessmentArgs,
}

/// Gap ordering.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum GapSort {
    /// Framework order: section, category, question.
    #[default]
    Traversal,
    /// Most severe first; framework order within a level.
    Severity,
}

#[derive(Clone, Debug, Args)]
pub struct GapsArgs {
    #[command(flatten)]
    pub input: AssessmentArgs,

    #[arg(long, value_enum, default_value_t = GapSort::Traversal)]
    pub sort: GapSort,

    /// Max gaps to print.
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub input: AssessmentArgs,

    /// Assign every task to this user (repeatable). Overrides the configured default.
    #[arg(long = "assignee")]
    pub assignees: Vec<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum TasksCommands {
    /// Create one task per gap in the configured task sink.
    Create(TasksCreateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct TasksCreateArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Only create tasks for these gap ids (repeatable), e.g. to retry failures.
    #[arg(long = "only")]
    pub only: Vec<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ControlsCommands {
    /// Write one control stub per gap to the configured control sink.
    Create(ControlsCreateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ControlsCreateArgs {
    #[command(flatten)]
    pub input: AssessmentArgs,
}

#[derive(Clone, Debug, Args)]
pub struct EvidenceArgs {
    /// Exported assessment JSON file.
    #[arg(short, long)]
    pub assessment: PathBuf,

    /// Evidence library file. Overrides `sources.evidence_library`.
    #[arg(long)]
    pub library: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct MappingsArgs {
    /// Control id to look up on either side of a mapping.
    #[arg(required_unless_present = "between")]
    pub control_id: Option<String>,

    /// Restrict to mappings joining these two frameworks.
    #[arg(long, num_args = 2, value_names = ["FRAMEWORK_A", "FRAMEWORK_B"])]
    pub between: Option<Vec<String>>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Registered record type, e.g. `flow` or `task_spec`. Lists types when omitted.
    pub type_name: Option<String>,

    /// Validate this JSON file against the schema instead of printing it.
    #[arg(long, requires = "type_name")]
    pub validate: Option<PathBuf>,
}
