//! Grading service for score validation and derived-value computation.

use rust_decimal::Decimal;

use super::error::GradingError;
use super::types::{Grade, GradedScores, ScoreSheet};

/// Maximum marks for a single CA test.
const CA_MAX: u32 = 10;
/// Maximum marks for the final exam.
const EXAM_MAX: u32 = 60;
/// Total obtainable marks (4 x 10 CA + 60 exam).
const TOTAL_MARKS: u32 = 100;

/// Grading service for business logic.
pub struct GradingService;

impl GradingService {
    /// Validates a score sheet and computes all derived values.
    ///
    /// Validation happens before any value is derived, so a failed call
    /// leaves nothing to persist.
    ///
    /// # Errors
    ///
    /// Returns `GradingError::CaScoreOutOfRange` naming the offending CA
    /// field, or `GradingError::ExamScoreOutOfRange`, when a score is
    /// outside its bound.
    pub fn grade(scores: &ScoreSheet) -> Result<GradedScores, GradingError> {
        Self::validate(scores)?;

        let ca_total = scores.ca_total();
        let marks_obtained = ca_total + scores.exam_score;
        let total_marks = Decimal::from(TOTAL_MARKS);

        let percentage = if total_marks.is_zero() {
            Decimal::ZERO
        } else {
            marks_obtained / total_marks * Decimal::ONE_HUNDRED
        };

        Ok(GradedScores {
            ca_total,
            marks_obtained,
            total_marks,
            percentage,
            grade: Grade::from_percentage(percentage),
        })
    }

    /// Validates every raw score against its bound.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range field, checked in declaration order.
    pub fn validate(scores: &ScoreSheet) -> Result<(), GradingError> {
        let ca_max = Decimal::from(CA_MAX);
        let ca_fields: [(&'static str, Decimal); 4] = [
            ("ca1_score", scores.ca1_score),
            ("ca2_score", scores.ca2_score),
            ("ca3_score", scores.ca3_score),
            ("ca4_score", scores.ca4_score),
        ];

        for (field, value) in ca_fields {
            if value < Decimal::ZERO || value > ca_max {
                return Err(GradingError::CaScoreOutOfRange { field, value });
            }
        }

        let exam_max = Decimal::from(EXAM_MAX);
        if scores.exam_score < Decimal::ZERO || scores.exam_score > exam_max {
            return Err(GradingError::ExamScoreOutOfRange {
                value: scores.exam_score,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sheet(ca: Decimal, exam: Decimal) -> ScoreSheet {
        ScoreSheet {
            ca1_score: ca,
            ca2_score: ca,
            ca3_score: ca,
            ca4_score: ca,
            exam_score: exam,
        }
    }

    #[test]
    fn test_full_marks() {
        let graded = GradingService::grade(&sheet(dec!(10), dec!(60))).unwrap();

        assert_eq!(graded.ca_total, dec!(40));
        assert_eq!(graded.marks_obtained, dec!(100));
        assert_eq!(graded.total_marks, dec!(100));
        assert_eq!(graded.percentage, dec!(100));
        assert_eq!(graded.grade, Grade::APlus);
    }

    #[test]
    fn test_band_boundaries_inclusive_lower() {
        // 90.00 is A+, 89.99 is A
        assert_eq!(Grade::from_percentage(dec!(90.00)), Grade::APlus);
        assert_eq!(Grade::from_percentage(dec!(89.99)), Grade::A);
        // 40.00 is C, 39.99 is D
        assert_eq!(Grade::from_percentage(dec!(40.00)), Grade::C);
        assert_eq!(Grade::from_percentage(dec!(39.99)), Grade::D);
        // Zero is F
        assert_eq!(Grade::from_percentage(Decimal::ZERO), Grade::F);
    }

    #[test]
    fn test_all_bands() {
        assert_eq!(Grade::from_percentage(dec!(95)), Grade::APlus);
        assert_eq!(Grade::from_percentage(dec!(85)), Grade::A);
        assert_eq!(Grade::from_percentage(dec!(75)), Grade::BPlus);
        assert_eq!(Grade::from_percentage(dec!(65)), Grade::B);
        assert_eq!(Grade::from_percentage(dec!(55)), Grade::CPlus);
        assert_eq!(Grade::from_percentage(dec!(45)), Grade::C);
        assert_eq!(Grade::from_percentage(dec!(35)), Grade::D);
        assert_eq!(Grade::from_percentage(dec!(29.99)), Grade::F);
    }

    #[test]
    fn test_ca_score_above_bound_rejected() {
        let mut s = sheet(dec!(5), dec!(30));
        s.ca3_score = dec!(10.01);

        let err = GradingService::grade(&s).unwrap_err();
        assert_eq!(
            err,
            GradingError::CaScoreOutOfRange {
                field: "ca3_score",
                value: dec!(10.01),
            }
        );
        assert_eq!(err.field(), "ca3_score");
    }

    #[test]
    fn test_exam_score_above_bound_rejected() {
        let err = GradingService::grade(&sheet(dec!(5), dec!(60.01))).unwrap_err();
        assert_eq!(
            err,
            GradingError::ExamScoreOutOfRange {
                value: dec!(60.01)
            }
        );
    }

    #[test]
    fn test_negative_score_rejected() {
        let mut s = sheet(dec!(5), dec!(30));
        s.ca1_score = dec!(-0.01);

        assert!(matches!(
            GradingService::grade(&s),
            Err(GradingError::CaScoreOutOfRange {
                field: "ca1_score",
                ..
            })
        ));
    }

    #[test]
    fn test_fractional_scores() {
        let s = ScoreSheet {
            ca1_score: dec!(7.5),
            ca2_score: dec!(8.25),
            ca3_score: dec!(6),
            ca4_score: dec!(9.75),
            exam_score: dec!(41.5),
        };
        let graded = GradingService::grade(&s).unwrap();

        assert_eq!(graded.ca_total, dec!(31.5));
        assert_eq!(graded.marks_obtained, dec!(73));
        assert_eq!(graded.percentage, dec!(73));
        assert_eq!(graded.grade, Grade::BPlus);
    }

    #[test]
    fn test_zero_scores_grade_f() {
        let graded = GradingService::grade(&sheet(Decimal::ZERO, Decimal::ZERO)).unwrap();

        assert_eq!(graded.marks_obtained, Decimal::ZERO);
        assert_eq!(graded.percentage, Decimal::ZERO);
        assert_eq!(graded.grade, Grade::F);
    }
}
