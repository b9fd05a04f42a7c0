//! P6 - Commission Calculator
//!
//! Splits the residual implied cost into what Finalis actually charges
//! this deal: for standard contracts, everything left after subscription
//! prepayment; for PAYG, an ARR contribution (building toward the
//! contract's annual target) plus an excess charged immediately as
//! commissions.

use rust_decimal::Decimal;

use super::p5_subscription::SubscriptionAppliedDeal;
use crate::types::{CommissionResult, Contract, ContractState, Deal};

/// Subscription-applied deal plus the commission split.
#[derive(Debug, Clone)]
pub struct CommissionComputedDeal {
    pub deal: SubscriptionAppliedDeal,
    /// Excess charged as commissions this deal (for PAYG, excess only;
    /// for standard, the full residual).
    pub finalis_commissions: Decimal,
    /// PAYG only; zero for standard contracts.
    pub arr_contribution: Decimal,
    pub entered_commissions_mode: bool,
}

impl CommissionComputedDeal {
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
        self.deal.advance_fees_created
    }
    pub fn implied_after_subscription(&self) -> Decimal {
        self.deal.implied_after_subscription
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

/// P6: Classify the residual implied cost.
///
/// # Standard path
/// `finalis_commissions = implied_after_subscription`;
/// `entered_commissions_mode` becomes true iff that residual is positive
/// (the contract has graduated past subscription prepayment) or the
/// contract was already in commissions mode.
///
/// # PAYG path
/// If already in commissions mode, the full implied cost is excess (no
/// further ARR to cover). Otherwise `arr_contribution =
/// min(implied_total, max(arr_target - accumulated, 0))` and the rest is
/// excess. `payg_commissions_accumulated` absorbs the ARR contribution.
/// `entered_commissions_mode` becomes true iff the accumulator reaches
/// `arr_target` exactly or exceeds it (strict `>=`).
pub fn compute_commission(mut input: SubscriptionAppliedDeal) -> CommissionResult<CommissionComputedDeal> {
    log::debug!("p6_commission: classifying residual for {}", input.deal().deal_name);

    let is_pay_as_you_go = input.contract().is_pay_as_you_go;
    let prior_in_commissions_mode = input.state().is_in_commissions_mode;

    if !is_pay_as_you_go {
        let finalis_commissions = input.implied_after_subscription;
        let entered_commissions_mode =
            finalis_commissions > Decimal::ZERO || prior_in_commissions_mode;

        return Ok(CommissionComputedDeal {
            deal: input,
            finalis_commissions,
            arr_contribution: Decimal::ZERO,
            entered_commissions_mode,
        });
    }

    let arr_target = input.contract().annual_subscription;
    let implied_total = input.implied_total();

    let (arr_contribution, excess) = if prior_in_commissions_mode {
        (Decimal::ZERO, implied_total)
    } else {
        let accumulated = input.state().payg_commissions_accumulated;
        let remaining_arr = (arr_target - accumulated).max(Decimal::ZERO);
        let arr_contribution = implied_total.min(remaining_arr);
        (arr_contribution, implied_total - arr_contribution)
    };

    input.state_mut().payg_commissions_accumulated += arr_contribution;
    let entered_commissions_mode =
        input.state().payg_commissions_accumulated >= arr_target;

    Ok(CommissionComputedDeal {
        deal: input,
        finalis_commissions: excess,
        arr_contribution,
        entered_commissions_mode,
    })
}
