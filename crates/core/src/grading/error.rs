//! Grading error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating assessment inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    /// A continuous-assessment score is outside [0, 10].
    #[error("{field} must be between 0 and 10, got {value}")]
    CaScoreOutOfRange {
        /// Name of the offending field (e.g. "ca2_score").
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// The exam score is outside [0, 60].
    #[error("exam_score must be between 0 and 60, got {value}")]
    ExamScoreOutOfRange {
        /// The rejected value.
        value: Decimal,
    },
}

impl GradingError {
    /// Returns the name of the field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::CaScoreOutOfRange { field, .. } => field,
            Self::ExamScoreOutOfRange { .. } => "exam_score",
        }
    }
}
