//! Ranking service: aggregates subject scores into ordered standings.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{RankedStudent, SubjectBreakdown, SubjectScore};

/// Ranking service for business logic.
pub struct RankingService;

impl RankingService {
    /// Aggregates per-subject scores into ranked class standings.
    ///
    /// Averages are a sum-over-sum: `Σ marks_obtained / Σ total_marks * 100`,
    /// rounded to 2 decimal places, which equals a plain average only while
    /// every subject shares the same marks scale. Students are sorted by
    /// descending average; ties share a position and the next distinct
    /// average takes its 1-indexed rank in the sorted order (competition
    /// ranking with gaps, not dense ranking).
    ///
    /// An empty input produces an empty table, not an error.
    #[must_use]
    pub fn rank(scores: Vec<SubjectScore>) -> Vec<RankedStudent> {
        // Group by student, preserving first-seen order for determinism.
        let mut order: Vec<Uuid> = Vec::new();
        let mut grouped: HashMap<Uuid, RankedStudent> = HashMap::new();

        for score in scores {
            let entry = grouped.entry(score.student_id).or_insert_with(|| {
                order.push(score.student_id);
                RankedStudent {
                    student_id: score.student_id,
                    student_name: score.student_name.clone(),
                    subjects: Vec::new(),
                    total_obtained: Decimal::ZERO,
                    total_max: Decimal::ZERO,
                    average_percentage: Decimal::ZERO,
                    position: 0,
                }
            });

            entry.total_obtained += score.marks_obtained;
            entry.total_max += score.total_marks;
            entry.subjects.push(SubjectBreakdown {
                subject_name: score.subject_name,
                marks_obtained: score.marks_obtained,
                total_marks: score.total_marks,
                grade: score.grade,
            });
        }

        let mut standings: Vec<RankedStudent> = order
            .into_iter()
            .filter_map(|id| grouped.remove(&id))
            .map(|mut student| {
                student.average_percentage = if student.total_max.is_zero() {
                    Decimal::ZERO
                } else {
                    (student.total_obtained / student.total_max * Decimal::ONE_HUNDRED).round_dp(2)
                };
                student
            })
            .collect();

        standings.sort_by(|a, b| {
            b.average_percentage
                .cmp(&a.average_percentage)
                .then_with(|| a.student_name.cmp(&b.student_name))
        });

        // Competition ranking: equal averages share a position; the next
        // distinct average takes its 1-indexed rank.
        let mut previous: Option<(Decimal, u32)> = None;
        for (index, student) in standings.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let rank = (index + 1) as u32;
            student.position = match previous {
                Some((avg, position)) if avg == student.average_percentage => position,
                _ => rank,
            };
            previous = Some((student.average_percentage, student.position));
        }

        standings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::Grade;
    use rust_decimal_macros::dec;

    fn score(student: (Uuid, &str), subject: &str, obtained: Decimal) -> SubjectScore {
        SubjectScore {
            student_id: student.0,
            student_name: student.1.to_string(),
            subject_name: subject.to_string(),
            marks_obtained: obtained,
            total_marks: dec!(100),
            grade: Grade::from_percentage(obtained),
        }
    }

    #[test]
    fn test_single_student_average() {
        let alice = (Uuid::new_v4(), "Alice");
        let standings = RankingService::rank(vec![
            score(alice, "Mathematics", dec!(80)),
            score(alice, "English", dec!(70)),
        ]);

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].total_obtained, dec!(150));
        assert_eq!(standings[0].total_max, dec!(200));
        assert_eq!(standings[0].average_percentage, dec!(75.00));
        assert_eq!(standings[0].position, 1);
        assert_eq!(standings[0].subjects.len(), 2);
    }

    #[test]
    fn test_ties_share_position_with_gaps() {
        let a = (Uuid::new_v4(), "Amara");
        let b = (Uuid::new_v4(), "Bode");
        let c = (Uuid::new_v4(), "Chidi");
        let standings = RankingService::rank(vec![
            score(a, "Mathematics", dec!(95)),
            score(b, "Mathematics", dec!(95)),
            score(c, "Mathematics", dec!(90)),
        ]);

        // Two tied at 1, the next distinct takes its sorted rank: 3.
        assert_eq!(standings[0].position, 1);
        assert_eq!(standings[1].position, 1);
        assert_eq!(standings[2].position, 3);
    }

    #[test]
    fn test_tie_below_leader() {
        let a = (Uuid::new_v4(), "Amara");
        let b = (Uuid::new_v4(), "Bode");
        let c = (Uuid::new_v4(), "Chidi");
        let standings = RankingService::rank(vec![
            score(a, "English", dec!(90)),
            score(b, "English", dec!(85)),
            score(c, "English", dec!(85)),
        ]);

        assert_eq!(standings[0].position, 1);
        assert_eq!(standings[1].position, 2);
        assert_eq!(standings[2].position, 2);
    }

    #[test]
    fn test_sorted_descending_by_average() {
        let low = (Uuid::new_v4(), "Low");
        let high = (Uuid::new_v4(), "High");
        let standings = RankingService::rank(vec![
            score(low, "Mathematics", dec!(40)),
            score(high, "Mathematics", dec!(90)),
        ]);

        assert_eq!(standings[0].student_name, "High");
        assert_eq!(standings[1].student_name, "Low");
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        assert!(RankingService::rank(vec![]).is_empty());
    }

    #[test]
    fn test_average_rounds_to_two_places() {
        let s = (Uuid::new_v4(), "Sola");
        let standings = RankingService::rank(vec![
            score(s, "Mathematics", dec!(70)),
            score(s, "English", dec!(70)),
            score(s, "Science", dec!(71)),
        ]);

        // 211 / 300 * 100 = 70.333... -> 70.33
        assert_eq!(standings[0].average_percentage, dec!(70.33));
    }

    #[test]
    fn test_zero_total_max_defaults_to_zero_average() {
        let s = (Uuid::new_v4(), "Zed");
        let standings = RankingService::rank(vec![SubjectScore {
            student_id: s.0,
            student_name: s.1.to_string(),
            subject_name: "Mathematics".to_string(),
            marks_obtained: Decimal::ZERO,
            total_marks: Decimal::ZERO,
            grade: Grade::F,
        }]);

        assert_eq!(standings[0].average_percentage, Decimal::ZERO);
    }
}
