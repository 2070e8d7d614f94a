//! Effort and due-date estimation tables.

use chrono::{DateTime, TimeDelta, Utc};

use cf_core::enums::{QuestionPriority, Severity};

/// Base effort in hours for a gap of the given severity.
#[must_use]
pub const fn base_hours(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 16,
        Severity::High => 8,
        Severity::Medium => 4,
        Severity::Low => 2,
    }
}

/// Priority multiplier as a `(numerator, denominator)` ratio.
///
/// An absent priority weighs the same as `low`.
#[must_use]
pub const fn priority_multiplier(priority: Option<QuestionPriority>) -> (u32, u32) {
    match priority {
        Some(QuestionPriority::High) => (2, 1),
        Some(QuestionPriority::Medium) => (3, 2),
        Some(QuestionPriority::Low) | None => (1, 1),
    }
}

/// Estimated effort: `round(base × multiplier)`, halves rounded up.
#[must_use]
pub const fn estimate_hours(severity: Severity, priority: Option<QuestionPriority>) -> u32 {
    let (numerator, denominator) = priority_multiplier(priority);
    let scaled = base_hours(severity) * numerator;
    (2 * scaled + denominator) / (2 * denominator)
}

/// Calendar days from synthesis until the task is due.
#[must_use]
pub const fn due_date_offset_days(severity: Severity) -> i64 {
    match severity {
        Severity::Critical => 7,
        Severity::High => 14,
        Severity::Medium => 30,
        Severity::Low => 60,
    }
}

/// Due date for a gap synthesized at `now`.
#[must_use]
pub fn due_date(severity: Severity, now: DateTime<Utc>) -> DateTime<Utc> {
    now + TimeDelta::days(due_date_offset_days(severity))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Severity::Critical, Some(QuestionPriority::High), 32)]
    #[case(Severity::Critical, Some(QuestionPriority::Medium), 24)]
    #[case(Severity::Critical, None, 16)]
    #[case(Severity::High, Some(QuestionPriority::High), 16)]
    #[case(Severity::High, Some(QuestionPriority::Medium), 12)]
    #[case(Severity::Medium, Some(QuestionPriority::Medium), 6)]
    #[case(Severity::Medium, Some(QuestionPriority::Low), 4)]
    #[case(Severity::Low, Some(QuestionPriority::Medium), 3)]
    #[case(Severity::Low, None, 2)]
    fn hours_table(
        #[case] severity: Severity,
        #[case] priority: Option<QuestionPriority>,
        #[case] expected: u32,
    ) {
        assert_eq!(estimate_hours(severity, priority), expected);
    }

    #[test]
    fn hours_are_monotonic_in_severity() {
        let high = Some(QuestionPriority::High);
        assert!(estimate_hours(Severity::Critical, high) > estimate_hours(Severity::High, high));
        assert!(estimate_hours(Severity::High, high) > estimate_hours(Severity::Medium, high));
        assert!(estimate_hours(Severity::Medium, high) > estimate_hours(Severity::Low, high));
    }

    #[test]
    fn absent_priority_matches_low() {
        for severity in Severity::ALL {
            assert_eq!(
                estimate_hours(severity, None),
                estimate_hours(severity, Some(QuestionPriority::Low))
            );
        }
    }

    #[rstest]
    #[case(Severity::Critical, 7)]
    #[case(Severity::High, 14)]
    #[case(Severity::Medium, 30)]
    #[case(Severity::Low, 60)]
    fn due_dates_are_calendar_offsets(#[case] severity: Severity, #[case] days: i64) {
        let now = Utc.with_ymd_and_hms(2026, 2, 20, 9, 30, 0).unwrap();
        let due = due_date(severity, now);
        assert_eq!((due - now).num_days(), days);
        assert_eq!(due_date_offset_days(severity), days);
    }
}
