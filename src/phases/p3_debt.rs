//! P3 - Debt Collector
//!
//! Collects regular debt, then the current contract year's deferred
//! amount, out of the deal's gross success fees (never the
//! retainer-inclusive basis — the external retainer never flows through
//! debt or payout). Standard contracts convert 100% of what's collected
//! into credit; PAYG contracts generate none.

use rust_decimal::Decimal;

use super::p2_implied_cost::ImpliedCostDeal;
use crate::algorithms::collect_debt;
use crate::types::{CommissionResult, Contract, ContractState, Deal};

/// Implied-cost deal plus the outcome of this deal's debt collection.
#[derive(Debug, Clone)]
pub struct DebtCollectedDeal {
    pub deal: ImpliedCostDeal,
    pub contract_year: Option<i64>,
    pub debt_collected: Decimal,
    pub credit_generated: Decimal,
}

impl DebtCollectedDeal {
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

/// P3: Collect debt and generate credit.
///
/// Available basis for collection is `success_fees`. Regular debt is
/// collected first, then the current contract year's deferred-schedule
/// entry out of whatever remains. `current_debt` and the matching
/// deferred entry are decremented in place. Credit is generated 1:1 on
/// everything collected for standard contracts; PAYG contracts never
/// accrue credit (enforced here regardless of what was collected).
pub fn collect_debt_phase(mut input: ImpliedCostDeal) -> CommissionResult<DebtCollectedDeal> {
    let deal_name = input.deal().deal_name.clone();
    log::debug!("p3_debt: collecting debt for {deal_name}");

    let deal_date = input.deal().deal_date;
    let contract_start_date = input.contract().contract_start_date;
    let available = input.deal().success_fees;
    let is_pay_as_you_go = input.contract().is_pay_as_you_go;

    let result = collect_debt(input.state_mut(), deal_date, contract_start_date, available);

    let credit_generated = if is_pay_as_you_go {
        Decimal::ZERO
    } else {
        result.debt_collected
    };
    input.state_mut().current_credit += credit_generated;

    Ok(DebtCollectedDeal {
        deal: input,
        contract_year: result.contract_year,
        debt_collected: result.debt_collected,
        credit_generated,
    })
}
