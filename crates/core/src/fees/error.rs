//! Fee ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating payment input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    /// Payment amount is negative.
    #[error("amount_paid must not be negative, got {0}")]
    NegativeAmount(Decimal),
}
