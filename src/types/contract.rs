//! Contract configuration and evolving contract state.
//!
//! `Contract` is immutable per call (the governing rules for this broker's
//! engagement). `ContractState` is both an input (the state as of just
//! before this deal) and an output (the successor state the caller must
//! persist) — the engine never writes to a store itself.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which rate regime a contract uses to derive implied cost absent a
/// preferred-rate override or exempt-deal flat rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RateType {
    /// A single flat rate applied to the basis.
    Fixed,
    /// Progressive tiers keyed by cumulative success fees (Lehman formula).
    Lehman,
}

/// What the cost-cap ceiling tracks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CostCapType {
    /// Resets every contract year.
    Annual,
    /// Accumulates over the life of the contract.
    Total,
}

/// One band of a Lehman progressive rate schedule. Ranges are half-open
/// `[lower_bound, upper_bound)`; `upper_bound = None` means unbounded.
/// Tiers must be sorted by `lower_bound`; gaps between tiers are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LehmanTier {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

/// The governing rules for a broker's contract, immutable for the duration
/// of a single deal call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub rate_type: RateType,
    /// Required iff `rate_type == Fixed`.
    pub fixed_rate: Option<Decimal>,
    /// Required (non-empty) iff `rate_type == Lehman`.
    #[serde(default)]
    pub lehman_tiers: Vec<LehmanTier>,

    /// Cumulative success fees processed under this contract before this
    /// deal — the Lehman traversal cursor's starting point.
    pub accumulated_success_fees_before_this_deal: Decimal,

    pub contract_start_date: Option<NaiveDate>,

    pub is_pay_as_you_go: bool,
    /// PAYG's ARR target.
    pub annual_subscription: Decimal,

    pub cost_cap_type: Option<CostCapType>,
    pub cost_cap_amount: Option<Decimal>,
}

/// Due-date-ordered scheduled subscription payment the contract may have
/// prepaid in advance from commission proceeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPayment {
    pub payment_id: String,
    pub due_date: NaiveDate,
    pub amount_due: Decimal,
    pub amount_paid: Decimal,
}

impl SubscriptionPayment {
    /// Remaining amount owed on this scheduled payment.
    pub fn remaining(&self) -> Decimal {
        self.amount_due - self.amount_paid
    }
}

/// One contract-year's worth of unpaid/deferred subscription fee, carried
/// forward for collection out of future deals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeferredScheduleEntry {
    /// 1-based contract-year ordinal this deferral applies to.
    pub year: i64,
    pub amount: Decimal,
}

/// The contract's evolving state: both the state as of just before this
/// deal (input) and, after processing, the state the caller must persist
/// (output). The engine deep-copies this on entry and never aliases the
/// caller's structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractState {
    pub current_credit: Decimal,
    pub current_debt: Decimal,
    pub is_in_commissions_mode: bool,
    #[serde(default)]
    pub future_subscription_fees: Vec<SubscriptionPayment>,
    #[serde(default)]
    pub deferred_schedule: Vec<DeferredScheduleEntry>,
    /// Legacy scalar, superseded by `deferred_schedule` whenever the list
    /// is non-empty — see DESIGN.md for the precedence decision.
    #[serde(default)]
    pub deferred_subscription_fee: Decimal,
    #[serde(default)]
    pub total_paid_this_contract_year: Decimal,
    #[serde(default)]
    pub total_paid_all_time: Decimal,
    #[serde(default)]
    pub payg_commissions_accumulated: Decimal,
}

impl ContractState {
    /// The deferred amount applicable to `year`, per the legacy-vs-list
    /// precedence rule: `deferred_schedule` is authoritative whenever it
    /// is non-empty; the legacy scalar is consulted only as a fallback,
    /// and only for year 1.
    pub fn deferred_amount_for_year(&self, year: i64) -> Decimal {
        if !self.deferred_schedule.is_empty() {
            self.deferred_schedule
                .iter()
                .find(|entry| entry.year == year)
                .map(|entry| entry.amount)
                .unwrap_or_default()
        } else if year == 1 {
            self.deferred_subscription_fee
        } else {
            Decimal::ZERO
        }
    }

    /// Remove or decrement the deferred entry for `year` by `collected`,
    /// mirroring whichever source `deferred_amount_for_year` used.
    pub fn reduce_deferred_for_year(&mut self, year: i64, collected: Decimal) {
        if !self.deferred_schedule.is_empty() {
            if let Some(pos) = self.deferred_schedule.iter().position(|e| e.year == year) {
                self.deferred_schedule[pos].amount -= collected;
                if self.deferred_schedule[pos].amount == Decimal::ZERO {
                    self.deferred_schedule.remove(pos);
                }
            }
        } else if year == 1 {
            self.deferred_subscription_fee -= collected;
        }
    }
}
