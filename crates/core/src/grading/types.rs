//! Grading domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Academic term within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    /// First term.
    First,
    /// Second term.
    Second,
    /// Third term.
    Third,
    /// Final exam period.
    Final,
}

impl Term {
    /// Parses a term from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first" => Some(Self::First),
            "second" => Some(Self::Second),
            "third" => Some(Self::Third),
            "final" => Some(Self::Final),
            _ => None,
        }
    }

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Final => "final",
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter grade bands, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// 90% and above.
    APlus,
    /// 80% to below 90%.
    A,
    /// 70% to below 80%.
    BPlus,
    /// 60% to below 70%.
    B,
    /// 50% to below 60%.
    CPlus,
    /// 40% to below 50%.
    C,
    /// 30% to below 40%.
    D,
    /// Below 30%.
    F,
}

impl Grade {
    /// Derives the letter grade from a percentage.
    ///
    /// Bands are non-overlapping with inclusive lower bounds, evaluated
    /// in descending order.
    #[must_use]
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage >= Decimal::from(90) {
            Self::APlus
        } else if percentage >= Decimal::from(80) {
            Self::A
        } else if percentage >= Decimal::from(70) {
            Self::BPlus
        } else if percentage >= Decimal::from(60) {
            Self::B
        } else if percentage >= Decimal::from(50) {
            Self::CPlus
        } else if percentage >= Decimal::from(40) {
            Self::C
        } else if percentage >= Decimal::from(30) {
            Self::D
        } else {
            Self::F
        }
    }

    /// Returns the display form (e.g. "A+").
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw assessment inputs for one student/subject/term.
///
/// Four continuous-assessment scores worth 10 marks each plus a final
/// exam worth 60 marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    /// CA test 1 (max 10 marks).
    pub ca1_score: Decimal,
    /// CA test 2 (max 10 marks).
    pub ca2_score: Decimal,
    /// CA test 3 (max 10 marks).
    pub ca3_score: Decimal,
    /// CA test 4 (max 10 marks).
    pub ca4_score: Decimal,
    /// Final exam (max 60 marks).
    pub exam_score: Decimal,
}

impl ScoreSheet {
    /// Sum of the four CA scores.
    #[must_use]
    pub fn ca_total(&self) -> Decimal {
        self.ca1_score + self.ca2_score + self.ca3_score + self.ca4_score
    }
}

/// Derived values for a validated score sheet.
///
/// These are never caller-settable; they are recomputed from the raw
/// scores on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedScores {
    /// Sum of the four CA scores (max 40).
    pub ca_total: Decimal,
    /// CA total plus exam score (max 100).
    pub marks_obtained: Decimal,
    /// Maximum obtainable marks; always 100.
    pub total_marks: Decimal,
    /// `marks_obtained / total_marks * 100`.
    pub percentage: Decimal,
    /// Letter grade for the percentage.
    pub grade: Grade,
}
