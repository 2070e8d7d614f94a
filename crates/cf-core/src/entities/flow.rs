use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Gap;
use crate::enums::Severity;

/// Per-level gap counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    /// Count gaps by severity.
    #[must_use]
    pub fn tally<'a>(gaps: impl IntoIterator<Item = &'a Gap>) -> Self {
        let mut counts = Self::default();
        for gap in gaps {
            match gap.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }

    #[must_use]
    pub const fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

/// Aggregate result of analyzing one assessment against one framework.
///
/// Built once and read-only afterwards; a new analysis always produces a new
/// `Flow`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Flow {
    pub assessment_id: String,
    pub framework_id: String,
    /// Gaps in framework traversal order.
    pub gaps: Vec<Gap>,
    pub total_gaps: usize,
    pub critical_gaps: usize,
    pub high_gaps: usize,
    pub can_create_tasks: bool,
    pub can_create_controls: bool,
    pub can_link_evidence: bool,
}

impl Flow {
    /// Counts for all four severity levels.
    #[must_use]
    pub fn severity_counts(&self) -> SeverityCounts {
        SeverityCounts::tally(&self.gaps)
    }

    /// Gaps ordered most severe first. Ties keep traversal order.
    #[must_use]
    pub fn gaps_by_severity(&self) -> Vec<&Gap> {
        let mut gaps: Vec<&Gap> = self.gaps.iter().collect();
        gaps.sort_by(|a, b| b.severity.cmp(&a.severity));
        gaps
    }

    /// Whether the assessment has no gaps against this framework.
    #[must_use]
    pub const fn is_fully_compliant(&self) -> bool {
        self.total_gaps == 0
    }
}
