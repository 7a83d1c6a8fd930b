//! Fee ledger service: amount resolution, capped accumulation, status.

use rust_decimal::Decimal;

use super::error::FeeError;
use super::types::{FeeResolution, LedgerUpdate, PaymentStatus};

/// Fee ledger service for business logic.
pub struct FeeService;

impl FeeService {
    /// Resolves the authoritative full fee amount.
    ///
    /// Precedence: the schedule amount for the student's current grade
    /// overrides any caller-supplied structure, which overrides the
    /// caller's total, which falls back to the incoming payment itself.
    /// The chain guarantees a payment is never rejected for missing
    /// schedule data.
    #[must_use]
    pub fn resolve_total_amount(resolution: &FeeResolution, payment_amount: Decimal) -> Decimal {
        resolution
            .schedule_amount
            .or(resolution.structure_hint_amount)
            .or(resolution.requested_total)
            .unwrap_or(payment_amount)
    }

    /// Applies one incoming payment to the ledger row.
    ///
    /// `previous_paid` is `None` when no ledger row exists yet for the
    /// (student, year, term) key. The running total accumulates and is
    /// capped at `total_amount`; excess is silently absorbed, never
    /// recorded as credit.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::NegativeAmount` if the incoming amount is
    /// negative. Nothing is written in that case.
    pub fn apply_payment(
        previous_paid: Option<Decimal>,
        amount: Decimal,
        total_amount: Decimal,
    ) -> Result<LedgerUpdate, FeeError> {
        if amount < Decimal::ZERO {
            return Err(FeeError::NegativeAmount(amount));
        }

        let amount_paid = (previous_paid.unwrap_or(Decimal::ZERO) + amount).min(total_amount);

        Ok(LedgerUpdate {
            amount_paid,
            total_amount,
            status: Self::derive_status(amount_paid, total_amount),
        })
    }

    /// Derives the payment status from the running total.
    ///
    /// `paid` requires the full amount to be positive; a zero-fee row can
    /// only ever be `pending`.
    #[must_use]
    pub fn derive_status(amount_paid: Decimal, total_amount: Decimal) -> PaymentStatus {
        if total_amount > Decimal::ZERO && amount_paid >= total_amount {
            PaymentStatus::Paid
        } else if amount_paid > Decimal::ZERO {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_accumulation_converges_and_absorbs_excess() {
        let total = dec!(300);
        let payments = [dec!(100), dec!(100), dec!(100), dec!(50)];
        let expected = [
            (dec!(100), PaymentStatus::Partial),
            (dec!(200), PaymentStatus::Partial),
            (dec!(300), PaymentStatus::Paid),
            (dec!(300), PaymentStatus::Paid),
        ];

        let mut paid: Option<Decimal> = None;
        for (amount, (want_paid, want_status)) in payments.into_iter().zip(expected) {
            let update = FeeService::apply_payment(paid, amount, total).unwrap();
            assert_eq!(update.amount_paid, want_paid);
            assert_eq!(update.status, want_status);
            paid = Some(update.amount_paid);
        }
    }

    #[test]
    fn test_first_payment_capped_at_total() {
        let update = FeeService::apply_payment(None, dec!(500), dec!(300)).unwrap();

        assert_eq!(update.amount_paid, dec!(300));
        assert_eq!(update.status, PaymentStatus::Paid);
    }

    #[test]
    fn test_zero_payment_on_fresh_row_is_pending() {
        let update = FeeService::apply_payment(None, Decimal::ZERO, dec!(300)).unwrap();

        assert_eq!(update.amount_paid, Decimal::ZERO);
        assert_eq!(update.status, PaymentStatus::Pending);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = FeeService::apply_payment(None, dec!(-1), dec!(300)).unwrap_err();
        assert_eq!(err, FeeError::NegativeAmount(dec!(-1)));
    }

    #[test]
    fn test_schedule_amount_overrides_caller_values() {
        let resolution = FeeResolution {
            schedule_amount: Some(dec!(450)),
            structure_hint_amount: Some(dec!(400)),
            requested_total: Some(dec!(350)),
        };

        assert_eq!(
            FeeService::resolve_total_amount(&resolution, dec!(100)),
            dec!(450)
        );
    }

    #[test]
    fn test_resolution_fallback_chain() {
        // No schedule: the caller's structure wins.
        let resolution = FeeResolution {
            schedule_amount: None,
            structure_hint_amount: Some(dec!(400)),
            requested_total: Some(dec!(350)),
        };
        assert_eq!(
            FeeService::resolve_total_amount(&resolution, dec!(100)),
            dec!(400)
        );

        // No structure either: the requested total wins.
        let resolution = FeeResolution {
            requested_total: Some(dec!(350)),
            ..FeeResolution::default()
        };
        assert_eq!(
            FeeService::resolve_total_amount(&resolution, dec!(100)),
            dec!(350)
        );

        // Nothing resolved: the payment itself becomes the full amount.
        assert_eq!(
            FeeService::resolve_total_amount(&FeeResolution::default(), dec!(100)),
            dec!(100)
        );
    }

    #[test]
    fn test_zero_total_never_reaches_paid() {
        let update = FeeService::apply_payment(None, dec!(50), Decimal::ZERO).unwrap();

        // The cap clamps the running total to zero, so the row stays pending.
        assert_eq!(update.amount_paid, Decimal::ZERO);
        assert_eq!(update.status, PaymentStatus::Pending);
    }

    #[test]
    fn test_total_re_resolution_self_heals() {
        // 200 already paid against an old total of 400; the schedule now
        // says 250, so the next payment caps against the fresh total.
        let update = FeeService::apply_payment(Some(dec!(200)), dec!(100), dec!(250)).unwrap();

        assert_eq!(update.amount_paid, dec!(250));
        assert_eq!(update.total_amount, dec!(250));
        assert_eq!(update.status, PaymentStatus::Paid);
    }
}
