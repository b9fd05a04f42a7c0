//! Debt collection algorithm — regular debt first, then the current
//! contract year's deferred schedule entry, bounded by the deal's gross
//! success fees (never the retainer-inclusive basis).

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::ContractState;

/// 1-based contract-year ordinal for `deal_date` relative to
/// `contract_start_date`, using a flat 365-day slice (year 1 = days
/// 0-364; no leap-aware calendar logic, per the explicit design note this
/// engine preserves). Returns `None` if there is no start date, in which
/// case deferred collection is skipped entirely.
pub fn contract_year(deal_date: NaiveDate, contract_start_date: Option<NaiveDate>) -> Option<i64> {
    let start = contract_start_date?;
    let days = (deal_date - start).num_days();
    Some(days.div_euclid(365) + 1)
}

/// Outcome of a debt-collection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtCollectionResult {
    pub regular_collected: Decimal,
    pub deferred_collected: Decimal,
    pub debt_collected: Decimal,
    pub contract_year: Option<i64>,
}

/// Collect regular debt, then the current contract year's deferred amount,
/// out of `available` (the deal's gross success fees). Mutates `state` in
/// place: decrements `current_debt` and the matching deferred-schedule
/// entry (removing it once exhausted).
///
/// # Algorithm
/// 1. `regular_collected = min(current_debt, available)`; reduce
///    `current_debt`.
/// 2. Resolve the contract year for `deal_date`. If there is no contract
///    start date, skip deferred collection entirely.
/// 3. `deferred_applicable` = the schedule's amount for that year (0 if
///    absent); `deferred_collected = min(deferred_applicable, available -
///    regular_collected)`; decrement the entry, removing it if it reaches
///    zero.
/// 4. `debt_collected = regular_collected + deferred_collected`.
///
/// # Invariants
/// - `debt_collected <= available`
/// - `current_debt` never goes negative
/// - a deferred-schedule entry's amount never goes negative
pub fn collect_debt(
    state: &mut ContractState,
    deal_date: NaiveDate,
    contract_start_date: Option<NaiveDate>,
    available: Decimal,
) -> DebtCollectionResult {
    let regular_collected = state.current_debt.min(available);
    state.current_debt -= regular_collected;

    let year = contract_year(deal_date, contract_start_date);

    let deferred_collected = match year {
        Some(year) => {
            let remaining_available = available - regular_collected;
            let deferred_applicable = state.deferred_amount_for_year(year);
            let collected = deferred_applicable.min(remaining_available);
            if collected > Decimal::ZERO {
                state.reduce_deferred_for_year(year, collected);
            }
            collected
        }
        None => Decimal::ZERO,
    };

    DebtCollectionResult {
        regular_collected,
        deferred_collected,
        debt_collected: regular_collected + deferred_collected,
        contract_year: year,
    }
}
