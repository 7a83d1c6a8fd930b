//! Property-based tests for the fee ledger module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::FeeService;
use super::types::{FeeResolution, PaymentStatus};

/// Builds a decimal amount in hundredths.
fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

proptest! {
    /// The running total never exceeds the full amount, for any sequence
    /// of non-negative payments.
    #[test]
    fn test_running_total_never_overshoots(
        total in 0i64..=10_000_000,
        payments in prop::collection::vec(0i64..=1_000_000, 0..20),
    ) {
        let total = money(total);
        let mut paid: Option<Decimal> = None;

        for p in payments {
            let update = FeeService::apply_payment(paid, money(p), total).unwrap();
            prop_assert!(update.amount_paid <= total);
            paid = Some(update.amount_paid);
        }
    }

    /// With a fixed full amount, accumulation is monotone non-decreasing.
    #[test]
    fn test_accumulation_is_monotone(
        total in 1i64..=10_000_000,
        payments in prop::collection::vec(0i64..=1_000_000, 1..20),
    ) {
        let total = money(total);
        let mut paid = Decimal::ZERO;

        for p in payments {
            let update = FeeService::apply_payment(Some(paid), money(p), total).unwrap();
            prop_assert!(update.amount_paid >= paid);
            paid = update.amount_paid;
        }
    }

    /// Status is always consistent with the running total.
    #[test]
    fn test_status_matches_running_total(
        total in 0i64..=10_000_000,
        previous in 0i64..=10_000_000,
        amount in 0i64..=1_000_000,
    ) {
        let total = money(total);
        let update = FeeService::apply_payment(Some(money(previous)), money(amount), total).unwrap();

        let expected = if total > Decimal::ZERO && update.amount_paid >= total {
            PaymentStatus::Paid
        } else if update.amount_paid > Decimal::ZERO {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Pending
        };
        prop_assert_eq!(update.status, expected);
    }

    /// Resolution always yields one of the four candidates, in precedence
    /// order.
    #[test]
    fn test_resolution_precedence(
        schedule in proptest::option::of(0i64..=1_000_000),
        hint in proptest::option::of(0i64..=1_000_000),
        requested in proptest::option::of(0i64..=1_000_000),
        payment in 0i64..=1_000_000,
    ) {
        let resolution = FeeResolution {
            schedule_amount: schedule.map(money),
            structure_hint_amount: hint.map(money),
            requested_total: requested.map(money),
        };
        let resolved = FeeService::resolve_total_amount(&resolution, money(payment));

        let expected = schedule.or(hint).or(requested).unwrap_or(payment);
        prop_assert_eq!(resolved, money(expected));
    }
}
