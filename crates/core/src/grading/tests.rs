//! Property-based tests for the grading module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::GradingService;
use super::types::{Grade, ScoreSheet};

/// Builds a decimal score in hundredths within [0, max].
fn score(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

proptest! {
    /// Any in-range score sheet grades successfully, with marks_obtained
    /// equal to the sum of its parts and percentage equal to the marks
    /// (total is fixed at 100).
    #[test]
    fn test_in_range_sheets_always_grade(
        ca1 in 0i64..=1000,
        ca2 in 0i64..=1000,
        ca3 in 0i64..=1000,
        ca4 in 0i64..=1000,
        exam in 0i64..=6000,
    ) {
        let sheet = ScoreSheet {
            ca1_score: score(ca1),
            ca2_score: score(ca2),
            ca3_score: score(ca3),
            ca4_score: score(ca4),
            exam_score: score(exam),
        };

        let graded = GradingService::grade(&sheet).unwrap();

        prop_assert_eq!(graded.ca_total, score(ca1 + ca2 + ca3 + ca4));
        prop_assert_eq!(graded.marks_obtained, score(ca1 + ca2 + ca3 + ca4 + exam));
        prop_assert_eq!(graded.total_marks, Decimal::from(100));
        prop_assert_eq!(graded.percentage, score(ca1 + ca2 + ca3 + ca4 + exam));
    }

    /// Increasing any single score never decreases marks_obtained,
    /// percentage, or the grade band.
    #[test]
    fn test_grade_monotonicity(
        ca1 in 0i64..=1000,
        ca2 in 0i64..=1000,
        ca3 in 0i64..=1000,
        ca4 in 0i64..=1000,
        exam in 0i64..=6000,
        bump in 1i64..=500,
    ) {
        let base = ScoreSheet {
            ca1_score: score(ca1),
            ca2_score: score(ca2),
            ca3_score: score(ca3),
            ca4_score: score(ca4),
            exam_score: score(exam),
        };
        let bumped = ScoreSheet {
            exam_score: score((exam + bump).min(6000)),
            ..base
        };

        let before = GradingService::grade(&base).unwrap();
        let after = GradingService::grade(&bumped).unwrap();

        prop_assert!(after.marks_obtained >= before.marks_obtained);
        prop_assert!(after.percentage >= before.percentage);
        // Grade variants are declared highest-first, so "not lower band"
        // means the ordering must not increase.
        prop_assert!(after.grade <= before.grade);
    }

    /// Out-of-range CA scores are always rejected.
    #[test]
    fn test_out_of_range_ca_rejected(over in 1001i64..=100_000) {
        let sheet = ScoreSheet {
            ca1_score: score(over),
            ca2_score: Decimal::ZERO,
            ca3_score: Decimal::ZERO,
            ca4_score: Decimal::ZERO,
            exam_score: Decimal::ZERO,
        };

        prop_assert!(GradingService::grade(&sheet).is_err());
    }

    /// The derived grade always matches the band of the derived percentage.
    #[test]
    fn test_grade_matches_percentage_band(
        ca in 0i64..=1000,
        exam in 0i64..=6000,
    ) {
        let sheet = ScoreSheet {
            ca1_score: score(ca),
            ca2_score: score(ca),
            ca3_score: score(ca),
            ca4_score: score(ca),
            exam_score: score(exam),
        };

        let graded = GradingService::grade(&sheet).unwrap();
        prop_assert_eq!(graded.grade, Grade::from_percentage(graded.percentage));
    }
}
