//! Rate-kind evaluation — the tagged sum type for implied-cost derivation.
//!
//! `preferred | exempt | fixed | lehman` share a single evaluation
//! capability (`compute(basis) -> decimal`); this module expresses that as
//! one enum with one `evaluate` method rather than a priority-ordered
//! if/else chain spread across callers.
//!
//! # Invariants
//! - Lehman traversal never errors on a gap between tiers or on tier
//!   exhaustion; both are explicit, intentional control-flow paths.
//! - All rates are assumed already validated to lie in `[0, 1]` by the
//!   validator phase.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::LehmanTier;

/// The four mutually-exclusive ways a deal's implied cost can be derived.
/// Priority order when more than one could apply is the caller's
/// responsibility (see `p2_implied_cost`); this type only evaluates
/// whichever variant it is given.
#[derive(Debug, Clone)]
pub enum RateKind<'a> {
    /// Deal-level override; short-circuits all other rate logic.
    Preferred { rate: Decimal },
    /// Exempt deals are charged a flat 1.5% regardless of contract type.
    Exempt,
    /// A single flat rate applied to the whole basis.
    Fixed { rate: Decimal },
    /// Progressive tiers keyed by cumulative success fees, with the
    /// cursor starting at `accumulated_before_this_deal`.
    Lehman {
        tiers: &'a [LehmanTier],
        accumulated_before_this_deal: Decimal,
    },
}

/// Flat rate applied to exempt deals, regardless of contract configuration.
pub const EXEMPT_RATE: Decimal = dec!(0.015);

impl<'a> RateKind<'a> {
    /// Evaluate this rate kind against `basis`, returning the full-precision
    /// implied cost (not yet rounded to `Money`).
    ///
    /// # Complexity
    /// O(1) for `Preferred`/`Exempt`/`Fixed`; O(tiers) for `Lehman`.
    pub fn evaluate(&self, basis: Decimal) -> Decimal {
        match self {
            RateKind::Preferred { rate } => basis * rate,
            RateKind::Exempt => basis * EXEMPT_RATE,
            RateKind::Fixed { rate } => basis * rate,
            RateKind::Lehman {
                tiers,
                accumulated_before_this_deal,
            } => evaluate_lehman_tiers(tiers, *accumulated_before_this_deal, basis),
        }
    }
}

/// Traverse a Lehman progressive tier schedule, consuming `remaining`
/// (the deal's fee basis) starting at cursor `accumulated_before_this_deal`
/// (the contract's cumulative success fees prior to this deal).
///
/// # Algorithm
/// 1. `cursor = accumulated_before_this_deal`, `remaining = basis`.
/// 2. Find the first tier `T` with `cursor < T.upper_bound` (or
///    `T.upper_bound` unbounded).
/// 3. If `cursor < T.lower_bound` (a gap between tiers), jump
///    `cursor = T.lower_bound` without consuming any of `remaining` — the
///    gap-jump rule. This is not an error.
/// 4. Consume `take = min(remaining, T.upper_bound - cursor)` from `T`
///    (or `take = remaining` if `T.upper_bound` is unbounded); accrue
///    `take * T.rate`; advance `cursor += take`; `remaining -= take`.
/// 5. Repeat from step 2 until `remaining == 0` or tiers are exhausted.
///
/// # Invariants
/// - Never errors: a gap-jump consumes no basis, and exhausting the tier
///   list before `remaining` reaches zero simply stops accruing (the
///   untaken remainder is charged at an implicit 0% rate). Callers are
///   expected to supply an open-ended terminal tier if that behavior is
///   undesired.
///
/// # Complexity
/// O(tiers), single pass; no tier is visited more than once since the
/// cursor is monotonically non-decreasing.
pub fn evaluate_lehman_tiers(
    tiers: &[LehmanTier],
    accumulated_before_this_deal: Decimal,
    basis: Decimal,
) -> Decimal {
    let mut cursor = accumulated_before_this_deal;
    let mut remaining = basis;
    let mut implied_total = Decimal::ZERO;

    while remaining > Decimal::ZERO {
        let tier = tiers
            .iter()
            .find(|t| t.upper_bound.map_or(true, |upper| cursor < upper));

        let Some(tier) = tier else {
            // Tiers exhausted before remaining was consumed: the
            // remainder accrues at 0% (see module docs).
            break;
        };

        if cursor < tier.lower_bound {
            // Gap-jump: advance the cursor without consuming basis.
            cursor = tier.lower_bound;
            continue;
        }

        let take = match tier.upper_bound {
            Some(upper) => remaining.min(upper - cursor),
            None => remaining,
        };

        implied_total += take * tier.rate;
        cursor += take;
        remaining -= take;

        if take == Decimal::ZERO {
            // Defensive: a zero-width tier (lower == upper) would loop
            // forever otherwise. Tiers are expected to be well-formed,
            // but never spin.
            break;
        }
    }

    implied_total
}
