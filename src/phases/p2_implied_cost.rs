//! P2 - Implied-Cost Calculator
//!
//! Derives the deal's baseline charge against the retainer-inclusive
//! basis, applying whichever rate regime takes priority: a deal-level
//! preferred rate, the flat exempt rate, Lehman progressive tiers, or a
//! single fixed rate.

use rust_decimal::Decimal;

use super::p1_fees::FeesComputedDeal;
use crate::algorithms::RateKind;
use crate::types::{CommissionResult, Contract, ContractState, Deal, RateType};

/// Fees-computed deal plus its derived implied cost.
#[derive(Debug, Clone)]
pub struct ImpliedCostDeal {
    pub deal: FeesComputedDeal,
    pub implied_total: Decimal,
}

impl ImpliedCostDeal {
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
        self.implied_total
    }
    pub fn retainer_base(&self) -> Decimal {
        self.deal.retainer_base
    }
    pub fn finra_fee(&self) -> Decimal {
        self.deal.finra_fee
    }
    pub fn distribution_fee(&self) -> Decimal {
        self.deal.distribution_fee
    }
    pub fn sourcing_fee(&self) -> Decimal {
        self.deal.sourcing_fee
    }
}

/// P2: Derive `implied_total`.
///
/// # Priority (first match wins)
/// 1. `has_preferred_rate` — deal-level override, short-circuits all
///    other rate logic.
/// 2. `is_deal_exempt` — flat exempt rate.
/// 3. `rate_type == Lehman` — progressive tier traversal seeded with the
///    contract's accumulated success fees.
/// 4. Otherwise — the contract's single fixed rate.
pub fn compute_implied_cost(input: FeesComputedDeal) -> CommissionResult<ImpliedCostDeal> {
    let deal = input.deal();
    let contract = input.contract();
    log::debug!("p2_implied_cost: deriving implied cost for {}", deal.deal_name);

    let basis = input.retainer_base;

    let kind = if deal.has_preferred_rate {
        RateKind::Preferred {
            rate: deal.preferred_rate.unwrap_or_default(),
        }
    } else if deal.is_deal_exempt {
        RateKind::Exempt
    } else {
        match contract.rate_type {
            RateType::Lehman => RateKind::Lehman {
                tiers: &contract.lehman_tiers,
                accumulated_before_this_deal: contract.accumulated_success_fees_before_this_deal,
            },
            RateType::Fixed => RateKind::Fixed {
                rate: contract.fixed_rate.unwrap_or_default(),
            },
        }
    };

    let implied_total = kind.evaluate(basis);

    Ok(ImpliedCostDeal {
        deal: input,
        implied_total,
    })
}
