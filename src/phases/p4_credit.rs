//! P4 - Credit Applicator (standard contracts only)
//!
//! PAYG contracts never carry credit (enforced at validation and never
//! generated in P3), so this phase is a structural no-op for them rather
//! than a special case to branch on here.

use rust_decimal::Decimal;

use super::p3_debt::DebtCollectedDeal;
use crate::types::{CommissionResult, Contract, ContractState, Deal};

/// Debt-collected deal plus the outcome of applying existing credit
/// against the implied cost.
#[derive(Debug, Clone)]
pub struct CreditAppliedDeal {
    pub deal: DebtCollectedDeal,
    pub credit_used: Decimal,
    pub implied_after_credit: Decimal,
}

impl CreditAppliedDeal {
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
        self.deal.debt_collected
    }
    pub fn contract_year(&self) -> Option<i64> {
        self.deal.contract_year
    }
    pub fn credit_generated(&self) -> Decimal {
        self.deal.credit_generated
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

/// P4: Apply existing contract credit against the implied cost.
///
/// `credit_used = min(current_credit, implied_total)`;
/// `implied_after_credit = implied_total - credit_used`; `current_credit`
/// is reduced by the same amount.
pub fn apply_credit(mut input: DebtCollectedDeal) -> CommissionResult<CreditAppliedDeal> {
    log::debug!("p4_credit: applying credit for {}", input.deal().deal_name);

    let implied_total = input.deal.implied_total;
    let current_credit = input.state().current_credit;

    let credit_used = current_credit.min(implied_total).max(Decimal::ZERO);
    let implied_after_credit = implied_total - credit_used;
    input.state_mut().current_credit -= credit_used;

    Ok(CreditAppliedDeal {
        deal: input,
        credit_used,
        implied_after_credit,
    })
}
