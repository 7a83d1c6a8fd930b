//! Fee ledger domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment status of a fee ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Nothing paid yet.
    Pending,
    /// Fully paid.
    Paid,
    /// Past due; persisted but never derived by the ledger itself.
    Overdue,
    /// Partially paid.
    Partial,
}

impl PaymentStatus {
    /// Parses a status from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            "partial" => Some(Self::Partial),
            _ => None,
        }
    }

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Partial => "partial",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate amounts for resolving the authoritative full fee.
///
/// The schedule amount (looked up for the student's current grade) always
/// wins over anything the caller supplied; the remaining fields are
/// fallbacks so a payment is never rejected purely for missing schedule
/// data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeResolution {
    /// Amount from the fee schedule matching the student's current grade.
    pub schedule_amount: Option<Decimal>,
    /// Amount of the caller-supplied fee structure, if it resolved.
    pub structure_hint_amount: Option<Decimal>,
    /// Total amount supplied in the request payload.
    pub requested_total: Option<Decimal>,
}

/// Result of applying one payment to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerUpdate {
    /// Running total after the payment, capped at `total_amount`.
    pub amount_paid: Decimal,
    /// The freshly resolved authoritative full amount.
    pub total_amount: Decimal,
    /// Status derived from `amount_paid` against `total_amount`.
    pub status: PaymentStatus,
}
