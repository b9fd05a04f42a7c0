//! Forced-advance subscription prepayment — standard contracts only (PAYG
//! never carries a future-payments list, enforced by the validator).

use rust_decimal::Decimal;

use crate::types::SubscriptionPayment;

/// Outcome of a prepayment allocation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubscriptionAllocationResult {
    pub advance_fees_created: Decimal,
    pub implied_after_subscription: Decimal,
}

/// Sort `payments` by `due_date` ascending (stable), then walk them in
/// order prepaying each from `available` (the implied cost remaining
/// after credit application) until either `available` is exhausted or
/// every payment is fully paid.
///
/// # Algorithm
/// For each payment in due-date order: `take = min(payment.remaining(),
/// available)`; `payment.amount_paid += take`; `available -= take`;
/// `advance_fees_created += take`. Stops early once `available == 0`.
///
/// # Invariants
/// - `amount_paid <= amount_due` for every payment, always.
/// - `advance_fees_created <= available` on entry.
/// - The relative order of payments with equal `due_date` is preserved
///   (stable sort), so ties resolve in list order.
pub fn allocate_subscription(
    payments: &mut [SubscriptionPayment],
    available: Decimal,
) -> SubscriptionAllocationResult {
    payments.sort_by_key(|p| p.due_date);

    let mut available = available;
    let mut advance_fees_created = Decimal::ZERO;

    for payment in payments.iter_mut() {
        if available == Decimal::ZERO {
            break;
        }
        let take = payment.remaining().min(available);
        payment.amount_paid += take;
        available -= take;
        advance_fees_created += take;
    }

    SubscriptionAllocationResult {
        advance_fees_created,
        implied_after_subscription: available,
    }
}
