//! Ranking domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grading::Grade;

/// One recorded subject score feeding the ranking aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectScore {
    /// Student the score belongs to.
    pub student_id: Uuid,
    /// Student display name.
    pub student_name: String,
    /// Subject name.
    pub subject_name: String,
    /// Marks obtained in the subject.
    pub marks_obtained: Decimal,
    /// Maximum obtainable marks in the subject.
    pub total_marks: Decimal,
    /// Letter grade recorded for the subject.
    pub grade: Grade,
}

/// Per-subject line in a student's ranking breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectBreakdown {
    /// Subject name.
    pub subject_name: String,
    /// Marks obtained.
    pub marks_obtained: Decimal,
    /// Maximum obtainable marks.
    pub total_marks: Decimal,
    /// Letter grade.
    pub grade: Grade,
}

/// One row in the ranked class standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedStudent {
    /// Student ID.
    pub student_id: Uuid,
    /// Student display name.
    pub student_name: String,
    /// Per-subject breakdown, in input order.
    pub subjects: Vec<SubjectBreakdown>,
    /// Sum of marks obtained across subjects.
    pub total_obtained: Decimal,
    /// Sum of maximum marks across subjects.
    pub total_max: Decimal,
    /// `total_obtained / total_max * 100`, rounded to 2 decimal places.
    pub average_percentage: Decimal,
    /// 1-indexed position; tied students share a position and the next
    /// distinct average takes its 1-indexed rank in the sorted order.
    pub position: u32,
}
