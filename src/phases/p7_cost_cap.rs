//! P7 - Cost-Cap Enforcer
//!
//! Clamps the chargeable total — commissions plus, for PAYG, the ARR
//! contribution — against an annual or lifetime ceiling. Advance
//! subscription prepayments and the fixed service fees are never subject
//! to the cap. When a cut is required, excess is reduced before ARR, so
//! a PAYG contract's progress toward its ARR target is preserved as long
//! as possible.

use rust_decimal::Decimal;

use super::p6_commission::CommissionComputedDeal;
use crate::types::{CommissionResult, Contract, ContractState, CostCapType, Deal};

/// Commission-computed deal plus the post-cap chargeable amounts.
#[derive(Debug, Clone)]
pub struct CostCapEnforcedDeal {
    pub deal: CommissionComputedDeal,
    pub finalis_commissions: Decimal,
    pub arr_contribution: Decimal,
    pub entered_commissions_mode: bool,
    pub amount_not_charged_due_to_cap: Decimal,
}

impl CostCapEnforcedDeal {
    pub fn deal(&self) -> &Deal {
        self.deal.deal()
    }
    pub fn contract(&self) -> &Contract {
        self.deal.contract()
    }
    pub fn state(&self) -> &ContractState {
        self.deal.state()
    }
    pub fn state_mut(&mut self) -> &mut ContractState {
        self.deal.state_mut()
    }
    pub fn implied_total(&self) -> Decimal {
        self.deal.implied_total()
    }
    pub fn debt_collected(&self) -> Decimal {
        self.deal.debt_collected()
    }
    pub fn contract_year(&self) -> Option<i64> {
        self.deal.contract_year()
    }
    pub fn credit_used(&self) -> Decimal {
        self.deal.credit_used()
    }
    pub fn credit_generated(&self) -> Decimal {
        self.deal.credit_generated()
    }
    pub fn implied_after_credit(&self) -> Decimal {
        self.deal.implied_after_credit()
    }
    pub fn advance_fees_created(&self) -> Decimal {
        self.deal.advance_fees_created()
    }
    pub fn implied_after_subscription(&self) -> Decimal {
        self.deal.implied_after_subscription()
    }
    pub fn retainer_base(&self) -> Decimal {
        self.deal.retainer_base()
    }
    pub fn finra_fee(&self) -> Decimal {
        self.deal.finra_fee()
    }
    pub fn distribution_fee(&self) -> Decimal {
        self.deal.distribution_fee()
    }
    pub fn sourcing_fee(&self) -> Decimal {
        self.deal.sourcing_fee()
    }
}

/// P7: Enforce the configured cost cap, if any.
///
/// No-op when `cost_cap_type` is unset. Otherwise:
/// 1. `paid_so_far` reads `total_paid_this_contract_year` (annual) or
///    `total_paid_all_time` (total).
/// 2. `available = max(cost_cap_amount - paid_so_far, 0)`.
/// 3. `chargeable = min(finalis_commissions + arr_contribution,
///    available)`, clamped at zero.
/// 4. Any required cut is taken from commissions (excess) first, then
///    from the ARR contribution — preserving ARR progress.
/// 5. If the cut reduced the ARR contribution, `payg_commissions_accumulated`
///    is rolled back by the same amount, and `entered_commissions_mode`
///    is forced false if the accumulator no longer meets the ARR target.
pub fn enforce_cost_cap(mut input: CommissionComputedDeal) -> CommissionResult<CostCapEnforcedDeal> {
    log::debug!("p7_cost_cap: enforcing cap for {}", input.deal().deal_name);

    let Some(cap_type) = input.contract().cost_cap_type else {
        let finalis_commissions = input.finalis_commissions;
        let arr_contribution = input.arr_contribution;
        let entered_commissions_mode = input.entered_commissions_mode;
        return Ok(CostCapEnforcedDeal {
            deal: input,
            finalis_commissions,
            arr_contribution,
            entered_commissions_mode,
            amount_not_charged_due_to_cap: Decimal::ZERO,
        });
    };

    let cap_amount = input.contract().cost_cap_amount.unwrap_or_default();
    let arr_target = input.contract().annual_subscription;
    let is_pay_as_you_go = input.contract().is_pay_as_you_go;

    let paid_so_far = match cap_type {
        CostCapType::Annual => input.state().total_paid_this_contract_year,
        CostCapType::Total => input.state().total_paid_all_time,
    };
    let available = (cap_amount - paid_so_far).max(Decimal::ZERO);
    // Advance fees are never cut, but they still draw against the same
    // budget ahead of commissions/ARR — see §4.8's "simpler equivalent".
    let available_for_commission = (available - input.advance_fees_created()).max(Decimal::ZERO);

    let excess = input.finalis_commissions;
    let arr_contribution = input.arr_contribution;
    let total_original = excess + arr_contribution;

    let post_total = total_original.min(available_for_commission);
    let cut_needed = total_original - post_total;

    let cut_from_excess = excess.min(cut_needed);
    let post_excess = excess - cut_from_excess;
    let cut_from_arr = (cut_needed - cut_from_excess).min(arr_contribution);
    let post_arr = arr_contribution - cut_from_arr;

    let amount_not_charged_due_to_cap = cut_from_excess + cut_from_arr;

    let mut entered_commissions_mode = input.entered_commissions_mode;
    if is_pay_as_you_go && cut_from_arr > Decimal::ZERO {
        input.state_mut().payg_commissions_accumulated -= cut_from_arr;
        if input.state().payg_commissions_accumulated < arr_target {
            entered_commissions_mode = false;
        }
    }

    Ok(CostCapEnforcedDeal {
        deal: input,
        finalis_commissions: post_excess,
        arr_contribution: post_arr,
        entered_commissions_mode,
        amount_not_charged_due_to_cap,
    })
}
