//! P5 - Subscription Applicator (standard contracts only)
//!
//! Forces prepayment of scheduled future subscription payments out of
//! whatever implied cost survived credit application. PAYG contracts
//! never carry a future-payments list (enforced at validation), so this
//! phase degenerates into a pass-through for them without any branching.

use rust_decimal::Decimal;

use super::p4_credit::CreditAppliedDeal;
use crate::algorithms::allocate_subscription;
use crate::types::{CommissionResult, Contract, ContractState, Deal};

/// Credit-applied deal plus the outcome of forced subscription prepayment.
#[derive(Debug, Clone)]
pub struct SubscriptionAppliedDeal {
    pub deal: CreditAppliedDeal,
    pub advance_fees_created: Decimal,
    pub implied_after_subscription: Decimal,
}

impl SubscriptionAppliedDeal {
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
        self.deal.credit_used
    }
    pub fn credit_generated(&self) -> Decimal {
        self.deal.credit_generated()
    }
    pub fn implied_after_credit(&self) -> Decimal {
        self.deal.implied_after_credit
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

/// P5: Prepay scheduled future payments from `implied_after_credit`.
///
/// Payments are consumed in `due_date` order (stable sort); each is
/// topped up by `min(remaining, available)` until either `available`
/// reaches zero or every payment is fully paid.
pub fn apply_subscription(mut input: CreditAppliedDeal) -> CommissionResult<SubscriptionAppliedDeal> {
    log::debug!("p5_subscription: allocating prepayments for {}", input.deal().deal_name);

    let available = input.implied_after_credit;
    let result = allocate_subscription(&mut input.state_mut().future_subscription_fees, available);

    Ok(SubscriptionAppliedDeal {
        deal: input,
        advance_fees_created: result.advance_fees_created,
        implied_after_subscription: result.implied_after_subscription,
    })
}
