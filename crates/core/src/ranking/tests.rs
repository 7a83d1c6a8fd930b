//! Property-based tests for the ranking module.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::service::RankingService;
use super::types::SubjectScore;
use crate::grading::Grade;

fn subject_scores(marks: Vec<i64>) -> Vec<SubjectScore> {
    marks
        .into_iter()
        .enumerate()
        .map(|(i, m)| SubjectScore {
            student_id: Uuid::from_u128(u128::try_from(i).unwrap() + 1),
            student_name: format!("student-{i}"),
            subject_name: "Mathematics".to_string(),
            marks_obtained: Decimal::from(m),
            total_marks: Decimal::from(100),
            grade: Grade::from_percentage(Decimal::from(m)),
        })
        .collect()
}

proptest! {
    /// Positions start at 1, never exceed the table length, and averages
    /// are non-increasing down the table.
    #[test]
    fn test_positions_well_formed(marks in prop::collection::vec(0i64..=100, 1..30)) {
        let len = marks.len();
        let standings = RankingService::rank(subject_scores(marks));

        prop_assert_eq!(standings.len(), len);
        prop_assert_eq!(standings[0].position, 1);

        for pair in standings.windows(2) {
            prop_assert!(pair[0].average_percentage >= pair[1].average_percentage);
            if pair[0].average_percentage == pair[1].average_percentage {
                prop_assert_eq!(pair[0].position, pair[1].position);
            } else {
                prop_assert!(pair[1].position > pair[0].position);
            }
        }

        for (index, student) in standings.iter().enumerate() {
            // With-gaps ranking: a position is at most the 1-indexed rank.
            prop_assert!(u64::from(student.position) <= index as u64 + 1);
            prop_assert!(student.position >= 1);
        }
    }

    /// Every input row lands in exactly one student's breakdown.
    #[test]
    fn test_no_rows_lost(marks in prop::collection::vec(0i64..=100, 0..30)) {
        let total_rows = marks.len();
        let standings = RankingService::rank(subject_scores(marks));

        let breakdown_rows: usize = standings.iter().map(|s| s.subjects.len()).sum();
        prop_assert_eq!(breakdown_rows, total_rows);
    }
}
