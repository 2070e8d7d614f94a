//! Ordered enums for severities, priorities, taxonomy tags, and lifecycle statuses.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Ordinal urgency of a gap.
///
/// Variants are declared least-severe first so the derived `Ord` gives
/// `Critical > High > Medium > Low`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Numeric rank, `3` for critical down to `0` for low.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QuestionPriority
// ---------------------------------------------------------------------------

/// Priority attached to a framework question by its author.
///
/// An absent priority is modelled as `Option::None`, never as a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionPriority {
    High,
    Medium,
    Low,
}

impl QuestionPriority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse a priority label case-insensitively. Unknown labels yield `None`.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FunctionTag
// ---------------------------------------------------------------------------

/// Canonical lifecycle function used to classify remediation work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FunctionTag {
    Govern,
    Identify,
    Protect,
    Detect,
    Respond,
    Recover,
}

impl FunctionTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Govern => "govern",
            Self::Identify => "identify",
            Self::Protect => "protect",
            Self::Detect => "detect",
            Self::Respond => "respond",
            Self::Recover => "recover",
        }
    }

    /// Title-case label for human-facing output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Govern => "Govern",
            Self::Identify => "Identify",
            Self::Protect => "Protect",
            Self::Detect => "Detect",
            Self::Respond => "Respond",
            Self::Recover => "Recover",
        }
    }
}

impl fmt::Display for FunctionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MappingStrength
// ---------------------------------------------------------------------------

/// How closely two controls in different frameworks correspond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MappingStrength {
    Strong,
    Partial,
    Related,
}

impl MappingStrength {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Partial => "partial",
            Self::Related => "related",
        }
    }
}

impl fmt::Display for MappingStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a remediation task. Synthesis only ever sets `not_started`;
/// later states belong to the external task service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Blocked,
    Completed,
}

impl TaskStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ControlStatus
// ---------------------------------------------------------------------------

/// Implementation status of a control. Stubs start at `not_implemented`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ControlStatus {
    NotImplemented,
    PartiallyImplemented,
    Implemented,
}

impl ControlStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotImplemented => "not_implemented",
            Self::PartiallyImplemented => "partially_implemented",
            Self::Implemented => "implemented",
        }
    }
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Impact
// ---------------------------------------------------------------------------

/// Three-level impact tag used in task metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EvidenceType
// ---------------------------------------------------------------------------

/// Kind of artifact backing an evidence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceType {
    Document,
    Screenshot,
    Log,
    Policy,
    Configuration,
    Attestation,
    Other,
}

impl EvidenceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Screenshot => "screenshot",
            Self::Log => "log",
            Self::Policy => "policy",
            Self::Configuration => "configuration",
            Self::Attestation => "attestation",
            Self::Other => "other",
        }
    }

    /// Parse a type label case-insensitively, mapping anything unknown to `Other`.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "document" | "doc" | "file" => Self::Document,
            "screenshot" | "image" => Self::Screenshot,
            "log" | "logs" => Self::Log,
            "policy" => Self::Policy,
            "configuration" | "config" => Self::Configuration,
            "attestation" => Self::Attestation,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
