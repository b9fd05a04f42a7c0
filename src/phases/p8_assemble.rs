//! P8 - Payout & State Assembler
//!
//! The terminal stage: computes net payout, rolls the contract's running
//! counters forward, and assembles the response object the caller
//! persists and returns to its own clients.

use rust_decimal::Decimal;

use super::p7_cost_cap::CostCapEnforcedDeal;
use crate::types::{
    Calculations, CommissionResult, DealSummary, EngineOutput, Money, PaygTracking, Rate,
    StateChanges, UpdatedContractState,
};

/// P8: Assemble the final response.
///
/// `net_payout = success_fees - finra_fee - distribution_fee -
/// sourcing_fee - debt_collected - advance_fees_created -
/// finalis_commissions (- arr_contribution for PAYG)`, clamped at zero.
/// Running counters (`total_paid_this_contract_year`,
/// `total_paid_all_time`) absorb advance fees, commissions, and any ARR
/// contribution; `is_in_commissions_mode` rolls forward as `prior ||
/// entered_commissions_mode`.
pub fn assemble(mut input: CostCapEnforcedDeal) -> CommissionResult<EngineOutput> {
    log::debug!("p8_assemble: assembling output for {}", input.deal().deal_name);

    let deal_name = input.deal().deal_name.clone();
    let success_fees = input.deal().success_fees;
    let deal_date = input.deal().deal_date;
    let contract_year = input.contract_year();
    let is_pay_as_you_go = input.contract().is_pay_as_you_go;
    let annual_subscription = input.contract().annual_subscription;

    let finra_fee = input.finra_fee();
    let distribution_fee = input.distribution_fee();
    let sourcing_fee = input.sourcing_fee();
    let implied_total = input.implied_total();
    let debt_collected = input.debt_collected();
    let credit_generated = input.credit_generated();
    let credit_used = input.credit_used();
    let implied_after_credit = input.implied_after_credit();
    let advance_fees_created = input.advance_fees_created();
    let implied_after_subscription = input.implied_after_subscription();

    let finalis_commissions = input.finalis_commissions;
    let arr_contribution = input.arr_contribution;
    let amount_not_charged_due_to_cap = input.amount_not_charged_due_to_cap;
    let entered_commissions_mode = input.entered_commissions_mode;

    let payg_charge = if is_pay_as_you_go {
        finalis_commissions + arr_contribution
    } else {
        finalis_commissions
    };

    let net_payout = (success_fees
        - finra_fee
        - distribution_fee
        - sourcing_fee
        - debt_collected
        - advance_fees_created
        - payg_charge)
        .max(Decimal::ZERO);

    let prior_in_commissions_mode = input.state().is_in_commissions_mode;
    let charge_committed = advance_fees_created + finalis_commissions + arr_contribution;

    {
        let state = input.state_mut();
        state.total_paid_this_contract_year += charge_committed;
        state.total_paid_all_time += charge_committed;
        state.is_in_commissions_mode = prior_in_commissions_mode || entered_commissions_mode;
    }

    let credit_remaining = input.state().current_credit;
    let debt_remaining = input.state().current_debt;
    let updated_future_payments = input.state().future_subscription_fees.clone();
    let updated_contract_state = UpdatedContractState::from_state(input.state());

    let payg_tracking = if is_pay_as_you_go {
        let accumulated = input.state().payg_commissions_accumulated;
        let remaining_to_cover_arr = (annual_subscription - accumulated).max(Decimal::ZERO);
        let arr_coverage_percentage = if annual_subscription > Decimal::ZERO {
            (accumulated / annual_subscription).min(Decimal::ONE)
        } else {
            Decimal::ONE
        };
        Some(PaygTracking {
            arr_target: Money::new(annual_subscription),
            arr_contribution_this_deal: Money::new(arr_contribution),
            finalis_commissions_this_deal: Money::new(finalis_commissions),
            commissions_accumulated: Money::new(accumulated),
            remaining_to_cover_arr: Money::new(remaining_to_cover_arr),
            arr_coverage_percentage: Rate::from_decimal(arr_coverage_percentage),
        })
    } else {
        None
    };

    Ok(EngineOutput {
        deal_summary: DealSummary {
            deal_name,
            success_fees: Money::new(success_fees),
            deal_date,
            contract_year,
        },
        calculations: Calculations {
            finra_fee: Money::new(finra_fee),
            distribution_fee: Money::new(distribution_fee),
            sourcing_fee: Money::new(sourcing_fee),
            implied_total: Money::new(implied_total),
            debt_collected: Money::new(debt_collected),
            credit_used: Money::new(credit_used),
            implied_after_credit: Money::new(implied_after_credit),
            advance_fees_created: Money::new(advance_fees_created),
            implied_after_subscription: Money::new(implied_after_subscription),
            finalis_commissions: Money::new(finalis_commissions),
            amount_not_charged_due_to_cap: Money::new(amount_not_charged_due_to_cap),
            net_payout: Money::new(net_payout),
        },
        state_changes: StateChanges {
            debt_collected: Money::new(debt_collected),
            debt_remaining: Money::new(debt_remaining),
            credit_generated: Money::new(credit_generated),
            credit_used: Money::new(credit_used),
            credit_remaining: Money::new(credit_remaining),
            entered_commissions_mode,
            is_now_in_commissions_mode: prior_in_commissions_mode || entered_commissions_mode,
        },
        updated_future_payments,
        updated_contract_state,
        payg_tracking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::p0_validate::validate_deal;
    use crate::phases::p1_fees::compute_fees;
    use crate::phases::p2_implied_cost::compute_implied_cost;
    use crate::phases::p3_debt::collect_debt_phase;
    use crate::phases::p4_credit::apply_credit;
    use crate::phases::p5_subscription::apply_subscription;
    use crate::phases::p6_commission::compute_commission;
    use crate::phases::p7_cost_cap::enforce_cost_cap;
    use crate::types::{Contract, ContractState, Deal, RateType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn run(deal: Deal, contract: Contract, state: ContractState) -> EngineOutput {
        let validated = validate_deal(deal, contract, state).unwrap();
        let fees = compute_fees(validated).unwrap();
        let implied = compute_implied_cost(fees).unwrap();
        let debt = collect_debt_phase(implied).unwrap();
        let credit = apply_credit(debt).unwrap();
        let subscription = apply_subscription(credit).unwrap();
        let commission = compute_commission(subscription).unwrap();
        let capped = enforce_cost_cap(commission).unwrap();
        assemble(capped).unwrap()
    }

    fn base_deal() -> Deal {
        Deal {
            deal_name: "Acme / Example Co.".to_string(),
            success_fees: dec!(50_000),
            deal_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            is_distribution_fee_true: false,
            is_sourcing_fee_true: false,
            is_deal_exempt: false,
            has_finra_fee: false,
            external_retainer: dec!(0),
            has_external_retainer: false,
            include_retainer_in_fees: None,
            has_preferred_rate: false,
            preferred_rate: None,
        }
    }

    fn base_contract() -> Contract {
        Contract {
            rate_type: RateType::Fixed,
            fixed_rate: Some(dec!(0.05)),
            lehman_tiers: vec![],
            accumulated_success_fees_before_this_deal: dec!(0),
            contract_start_date: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            is_pay_as_you_go: false,
            annual_subscription: dec!(0),
            cost_cap_type: None,
            cost_cap_amount: None,
        }
    }

    fn base_state() -> ContractState {
        ContractState {
            current_credit: dec!(0),
            current_debt: dec!(0),
            is_in_commissions_mode: false,
            future_subscription_fees: vec![],
            deferred_schedule: vec![],
            deferred_subscription_fee: dec!(0),
            total_paid_this_contract_year: dec!(0),
            total_paid_all_time: dec!(0),
            payg_commissions_accumulated: dec!(0),
        }
    }

    #[test]
    fn debt_plus_deferred_partial_zeroes_out_payout() {
        use crate::types::DeferredScheduleEntry;
        let mut state = base_state();
        state.current_debt = dec!(30_000);
        state.deferred_schedule.push(DeferredScheduleEntry { year: 1, amount: dec!(40_000) });

        let output = run(base_deal(), base_contract(), state);

        assert_eq!(output.calculations.debt_collected.as_decimal(), dec!(50_000));
        assert_eq!(output.updated_contract_state.current_debt.as_decimal(), dec!(0));
        assert_eq!(output.calculations.net_payout.as_decimal(), dec!(0));
    }

    #[test]
    fn standard_deal_without_debt_pays_net_after_commissions() {
        let output = run(base_deal(), base_contract(), base_state());
        // implied_total = 50_000 * 0.05 = 2_500, all charged as commissions.
        assert_eq!(output.calculations.finalis_commissions.as_decimal(), dec!(2_500));
        assert_eq!(output.calculations.net_payout.as_decimal(), dec!(47_500));
        assert!(output.payg_tracking.is_none());
    }

    #[test]
    fn payg_tracking_block_present_only_for_payg_contracts() {
        let mut contract = base_contract();
        contract.is_pay_as_you_go = true;
        contract.annual_subscription = dec!(10_000);
        contract.contract_start_date = None;

        let output = run(base_deal(), contract, base_state());
        assert!(output.payg_tracking.is_some());
        let tracking = output.payg_tracking.unwrap();
        assert_eq!(tracking.arr_target.as_decimal(), dec!(10_000));
    }
}
