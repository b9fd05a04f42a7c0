//! Response types produced by the engine — the data a transport layer
//! serializes back to the caller, unchanged in shape regardless of
//! transport (HTTP, Lambda, WASM, direct call).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::contract::{ContractState, SubscriptionPayment};
use super::money::{Money, Rate};

/// Headline facts about the deal just processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealSummary {
    pub deal_name: String,
    pub success_fees: Money,
    pub deal_date: NaiveDate,
    /// 1-based contract-year ordinal this deal fell into, or `None` if the
    /// contract has no start date (deferred collection is skipped in that
    /// case).
    pub contract_year: Option<i64>,
}

/// The full arithmetic breakdown for this deal (§4 of the spec, in
/// pipeline order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculations {
    pub finra_fee: Money,
    pub distribution_fee: Money,
    pub sourcing_fee: Money,
    pub implied_total: Money,
    pub debt_collected: Money,
    pub credit_used: Money,
    pub implied_after_credit: Money,
    pub advance_fees_created: Money,
    pub implied_after_subscription: Money,
    pub finalis_commissions: Money,
    pub amount_not_charged_due_to_cap: Money,
    pub net_payout: Money,
}

/// The deltas this deal applied to the contract's running counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChanges {
    pub debt_collected: Money,
    pub debt_remaining: Money,
    pub credit_generated: Money,
    pub credit_used: Money,
    pub credit_remaining: Money,
    pub entered_commissions_mode: bool,
    pub is_now_in_commissions_mode: bool,
}

/// Updated, persistable snapshot of the contract's counters. The caller
/// owns persistence; the engine only ever computes the successor value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedContractState {
    pub current_credit: Money,
    pub current_debt: Money,
    pub is_in_commissions_mode: bool,
    pub total_paid_this_contract_year: Money,
    pub total_paid_all_time: Money,
}

impl UpdatedContractState {
    pub fn from_state(state: &ContractState) -> Self {
        UpdatedContractState {
            current_credit: Money::new(state.current_credit),
            current_debt: Money::new(state.current_debt),
            is_in_commissions_mode: state.is_in_commissions_mode,
            total_paid_this_contract_year: Money::new(state.total_paid_this_contract_year),
            total_paid_all_time: Money::new(state.total_paid_all_time),
        }
    }
}

/// PAYG-only tracking block, omitted entirely for standard contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaygTracking {
    pub arr_target: Money,
    pub arr_contribution_this_deal: Money,
    /// Excess only — the portion of implied cost above the ARR target,
    /// charged as Finalis commissions this deal.
    pub finalis_commissions_this_deal: Money,
    pub commissions_accumulated: Money,
    pub remaining_to_cover_arr: Money,
    pub arr_coverage_percentage: Rate,
}

/// The complete output of a single deal-processing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOutput {
    pub deal_summary: DealSummary,
    pub calculations: Calculations,
    pub state_changes: StateChanges,
    pub updated_future_payments: Vec<SubscriptionPayment>,
    pub updated_contract_state: UpdatedContractState,
    pub payg_tracking: Option<PaygTracking>,
}
