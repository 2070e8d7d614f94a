//! Severity classification of a single answered or unanswered question.

use cf_core::enums::{QuestionPriority, Severity};

/// Highest valid response value ("fully implemented").
pub const MAX_RESPONSE: i64 = 3;

/// Lowest response value that counts as compliant.
pub const COMPLIANT_THRESHOLD: u8 = 2;

/// Outcome of classifying one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The answer meets the requirement; no gap is emitted.
    Compliant,
    /// The question is a gap of the given severity.
    Gap(Severity),
}

impl Classification {
    #[must_use]
    pub const fn is_gap(self) -> bool {
        matches!(self, Self::Gap(_))
    }

    #[must_use]
    pub const fn severity(self) -> Option<Severity> {
        match self {
            Self::Compliant => None,
            Self::Gap(severity) => Some(severity),
        }
    }
}

/// Map a raw response onto the `0..=3` scale.
///
/// Values outside the range come from a less-trusted producer and are treated
/// as unanswered rather than rejected.
#[must_use]
pub fn normalize_response(raw: i64) -> Option<u8> {
    if (0..=MAX_RESPONSE).contains(&raw) {
        u8::try_from(raw).ok()
    } else {
        None
    }
}

/// Severity of an unanswered question, driven by its priority.
#[must_use]
pub const fn unanswered_severity(priority: Option<QuestionPriority>) -> Severity {
    match priority {
        Some(QuestionPriority::High) => Severity::Critical,
        Some(QuestionPriority::Medium) => Severity::High,
        Some(QuestionPriority::Low) | None => Severity::Medium,
    }
}

/// Classify a question from its recorded response and priority.
///
/// Rules, in order:
/// 1. absent (or out of range): critical / high / medium for high / medium / other priority
/// 2. `0`: critical
/// 3. `1`: high
/// 4. `2` or `3`: compliant
#[must_use]
pub fn classify(response: Option<i64>, priority: Option<QuestionPriority>) -> Classification {
    match response.and_then(normalize_response) {
        None => Classification::Gap(unanswered_severity(priority)),
        Some(0) => Classification::Gap(Severity::Critical),
        Some(1) => Classification::Gap(Severity::High),
        Some(_) => Classification::Compliant,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, Some(QuestionPriority::High), Classification::Gap(Severity::Critical))]
    #[case(None, Some(QuestionPriority::Medium), Classification::Gap(Severity::High))]
    #[case(None, Some(QuestionPriority::Low), Classification::Gap(Severity::Medium))]
    #[case(None, None, Classification::Gap(Severity::Medium))]
    #[case(Some(0), Some(QuestionPriority::Low), Classification::Gap(Severity::Critical))]
    #[case(Some(0), None, Classification::Gap(Severity::Critical))]
    #[case(Some(1), Some(QuestionPriority::High), Classification::Gap(Severity::High))]
    #[case(Some(1), None, Classification::Gap(Severity::High))]
    #[case(Some(2), Some(QuestionPriority::High), Classification::Compliant)]
    #[case(Some(3), None, Classification::Compliant)]
    fn classifies_by_rule(
        #[case] response: Option<i64>,
        #[case] priority: Option<QuestionPriority>,
        #[case] expected: Classification,
    ) {
        assert_eq!(classify(response, priority), expected);
    }

    #[rstest]
    #[case(-1)]
    #[case(4)]
    #[case(i64::MAX)]
    #[case(i64::MIN)]
    fn out_of_range_degrades_to_unanswered(#[case] raw: i64) {
        assert_eq!(normalize_response(raw), None);
        assert_eq!(
            classify(Some(raw), Some(QuestionPriority::High)),
            classify(None, Some(QuestionPriority::High))
        );
    }

    #[test]
    fn priority_does_not_affect_answered_gaps() {
        for priority in [
            None,
            Some(QuestionPriority::High),
            Some(QuestionPriority::Medium),
            Some(QuestionPriority::Low),
        ] {
            assert_eq!(classify(Some(0), priority).severity(), Some(Severity::Critical));
            assert_eq!(classify(Some(1), priority).severity(), Some(Severity::High));
            assert!(!classify(Some(2), priority).is_gap());
        }
    }
}
