//! P1 - Fee Calculator
//!
//! Computes the three fixed service fees (FINRA, distribution, sourcing)
//! against the retainer-inclusive basis. These are subtracted from the
//! broker's gross at payout time; they never feed debt or credit.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::p0_validate::ValidatedDeal;
use crate::types::{CommissionResult, Contract, ContractState, Deal};

/// FINRA trading activity fee rate applied to the retainer-inclusive basis.
pub const FINRA_RATE: Decimal = dec!(0.004732);
/// Distribution fee rate, when applicable.
pub const DISTRIBUTION_RATE: Decimal = dec!(0.10);
/// Sourcing fee rate, when applicable.
pub const SOURCING_RATE: Decimal = dec!(0.10);

/// Validated deal plus its computed fixed service fees.
#[derive(Debug, Clone)]
pub struct FeesComputedDeal {
    pub deal: ValidatedDeal,
    pub retainer_base: Decimal,
    pub finra_fee: Decimal,
    pub distribution_fee: Decimal,
    pub sourcing_fee: Decimal,
}

impl FeesComputedDeal {
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
}

/// P1: Compute FINRA, distribution, and sourcing fees.
///
/// `retainer_base = success_fees + external_retainer` when the retainer
/// exists and is configured to be folded into the basis; `success_fees`
/// alone otherwise. This same basis feeds the implied-cost calculator.
pub fn compute_fees(input: ValidatedDeal) -> CommissionResult<FeesComputedDeal> {
    let deal = input.deal();
    log::debug!("p1_fees: computing fees for {}", deal.deal_name);

    let retainer_base = deal.retainer_base();

    let finra_fee = if deal.has_finra_fee {
        retainer_base * FINRA_RATE
    } else {
        Decimal::ZERO
    };

    let distribution_fee = if deal.is_distribution_fee_true {
        retainer_base * DISTRIBUTION_RATE
    } else {
        Decimal::ZERO
    };

    let sourcing_fee = if deal.is_sourcing_fee_true {
        retainer_base * SOURCING_RATE
    } else {
        Decimal::ZERO
    };

    Ok(FeesComputedDeal {
        deal: input,
        retainer_base,
        finra_fee,
        distribution_fee,
        sourcing_fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::p0_validate::validate_deal;
    use crate::types::{ContractState, Deal, RateType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn validated(deal: Deal) -> ValidatedDeal {
        let contract = crate::types::Contract {
            rate_type: RateType::Fixed,
            fixed_rate: Some(dec!(0.05)),
            lehman_tiers: vec![],
            accumulated_success_fees_before_this_deal: dec!(0),
            contract_start_date: None,
            is_pay_as_you_go: false,
            annual_subscription: dec!(0),
            cost_cap_type: None,
            cost_cap_amount: None,
        };
        let state = ContractState {
            current_credit: dec!(0),
            current_debt: dec!(0),
            is_in_commissions_mode: false,
            future_subscription_fees: vec![],
            deferred_schedule: vec![],
            deferred_subscription_fee: dec!(0),
            total_paid_this_contract_year: dec!(0),
            total_paid_all_time: dec!(0),
            payg_commissions_accumulated: dec!(0),
        };
        validate_deal(deal, contract, state).unwrap()
    }

    fn base_deal() -> Deal {
        Deal {
            deal_name: "Acme / Example Co.".to_string(),
            success_fees: dec!(100_000),
            deal_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            is_distribution_fee_true: false,
            is_sourcing_fee_true: false,
            is_deal_exempt: false,
            has_finra_fee: true,
            external_retainer: dec!(0),
            has_external_retainer: false,
            include_retainer_in_fees: None,
            has_preferred_rate: false,
            preferred_rate: None,
        }
    }

    #[test]
    fn finra_fee_applies_by_default() {
        let result = compute_fees(validated(base_deal())).unwrap();
        assert_eq!(result.finra_fee, dec!(100_000) * FINRA_RATE);
        assert_eq!(result.distribution_fee, dec!(0));
        assert_eq!(result.sourcing_fee, dec!(0));
    }

    #[test]
    fn distribution_and_sourcing_fees_apply_when_flagged() {
        let mut deal = base_deal();
        deal.is_distribution_fee_true = true;
        deal.is_sourcing_fee_true = true;
        let result = compute_fees(validated(deal)).unwrap();
        assert_eq!(result.distribution_fee, dec!(10_000));
        assert_eq!(result.sourcing_fee, dec!(10_000));
    }

    #[test]
    fn finra_fee_disabled_when_flagged_off() {
        let mut deal = base_deal();
        deal.has_finra_fee = false;
        let result = compute_fees(validated(deal)).unwrap();
        assert_eq!(result.finra_fee, dec!(0));
    }

    #[test]
    fn retainer_inclusion_flows_into_fee_basis() {
        let mut deal = base_deal();
        deal.has_external_retainer = true;
        deal.external_retainer = dec!(10_000);
        deal.include_retainer_in_fees = Some(true);
        deal.is_distribution_fee_true = true;
        let result = compute_fees(validated(deal)).unwrap();
        assert_eq!(result.retainer_base, dec!(110_000));
        assert_eq!(result.distribution_fee, dec!(11_000));
    }
}
