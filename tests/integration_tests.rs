//! Integration tests for the commission engine.
//!
//! These exercise the full nine-phase pipeline end to end, mirroring the
//! literal scenarios used to validate the engine's business rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use commission_engine::{
    process_deal, validate_deal, Contract, ContractState, CostCapType, Deal, DeferredScheduleEntry,
    LehmanTier, RateType, SubscriptionPayment,
};

fn create_deal(success_fees: Decimal, deal_date: NaiveDate) -> Deal {
    Deal {
        deal_name: "Acme Co. / Example Target LLC".to_string(),
        success_fees,
        deal_date,
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

fn create_contract(rate_type: RateType) -> Contract {
    Contract {
        rate_type,
        fixed_rate: None,
        lehman_tiers: vec![],
        accumulated_success_fees_before_this_deal: dec!(0),
        contract_start_date: None,
        is_pay_as_you_go: false,
        annual_subscription: dec!(0),
        cost_cap_type: None,
        cost_cap_amount: None,
    }
}

fn create_state() -> ContractState {
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

fn default_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

#[test]
fn test_engine_version_exists() {
    let version = commission_engine::engine_version();
    assert!(!version.is_empty());
}

#[test]
fn test_validate_rejects_non_positive_success_fees() {
    let mut deal = create_deal(dec!(100_000), default_date());
    deal.success_fees = dec!(0);
    let mut contract = create_contract(RateType::Fixed);
    contract.fixed_rate = Some(dec!(0.05));

    let result = validate_deal(deal, contract, create_state());
    assert!(result.is_err());
}

/// Scenario 1: a deal-level preferred rate overrides Lehman tiers entirely.
#[test]
fn scenario_preferred_overrides_lehman() {
    let deal = Deal {
        has_preferred_rate: true,
        preferred_rate: Some(dec!(0.02)),
        ..create_deal(dec!(2_000_000), default_date())
    };

    let mut contract = create_contract(RateType::Lehman);
    contract.lehman_tiers = vec![
        LehmanTier { lower_bound: dec!(0), upper_bound: Some(dec!(1_000_000)), rate: dec!(0.05) },
        LehmanTier { lower_bound: dec!(1_000_000), upper_bound: None, rate: dec!(0.03) },
    ];

    let output = process_deal(deal, contract, create_state()).unwrap();
    assert_eq!(output.calculations.implied_total.as_decimal(), dec!(40_000.00));
}

/// Scenario 2: Lehman traversal with accumulated history and a gap.
#[test]
fn scenario_lehman_with_history_and_gap() {
    let deal = create_deal(dec!(3_000_000), default_date());

    let mut contract = create_contract(RateType::Lehman);
    contract.accumulated_success_fees_before_this_deal = dec!(4_000_000);
    contract.lehman_tiers = vec![
        LehmanTier { lower_bound: dec!(0), upper_bound: Some(dec!(1_000_000)), rate: dec!(0.05) },
        LehmanTier { lower_bound: dec!(1_000_000), upper_bound: Some(dec!(5_000_000)), rate: dec!(0.04) },
        LehmanTier { lower_bound: dec!(5_000_000), upper_bound: None, rate: dec!(0.03) },
    ];

    let output = process_deal(deal, contract, create_state()).unwrap();
    assert_eq!(output.calculations.implied_total.as_decimal(), dec!(100_000.00));
}

/// Scenario 3: an annual cost cap partially clamps commissions, leaving
/// FINRA excluded from the cap but still deducted from payout.
#[test]
fn scenario_annual_cap_partial() {
    let mut deal = create_deal(dec!(500_000), default_date());
    deal.has_finra_fee = false;

    let mut contract = create_contract(RateType::Fixed);
    contract.fixed_rate = Some(dec!(0.05));
    contract.cost_cap_type = Some(CostCapType::Annual);
    contract.cost_cap_amount = Some(dec!(100_000));

    let mut state = create_state();
    state.total_paid_this_contract_year = dec!(90_000);

    let output = process_deal(deal, contract, state).unwrap();
    assert_eq!(output.calculations.finalis_commissions.as_decimal(), dec!(10_000.00));
    assert_eq!(output.calculations.amount_not_charged_due_to_cap.as_decimal(), dec!(15_000.00));
}

/// Scenario 4: a PAYG contract crosses into commissions mode mid-deal.
#[test]
fn scenario_payg_entering_commissions_mode() {
    let deal = create_deal(dec!(100_000), default_date());

    let mut contract = create_contract(RateType::Fixed);
    contract.fixed_rate = Some(dec!(0.05));
    contract.is_pay_as_you_go = true;
    contract.annual_subscription = dec!(10_000);

    let mut state = create_state();
    state.payg_commissions_accumulated = dec!(8_000);

    let output = process_deal(deal, contract, state).unwrap();
    let tracking = output.payg_tracking.expect("PAYG contract must carry payg_tracking");
    assert_eq!(tracking.arr_contribution_this_deal.as_decimal(), dec!(2_000.00));
    assert_eq!(output.calculations.finalis_commissions.as_decimal(), dec!(3_000.00));
    assert!(output.state_changes.entered_commissions_mode);
}

/// Scenario 5: a total cost cap smaller than the ARR target leaves the
/// contract short of entering commissions mode.
#[test]
fn scenario_payg_cap_below_arr() {
    let deal = create_deal(dec!(500_000), default_date());

    let mut contract = create_contract(RateType::Fixed);
    contract.fixed_rate = Some(dec!(0.05));
    contract.is_pay_as_you_go = true;
    contract.annual_subscription = dec!(10_000);
    contract.cost_cap_type = Some(CostCapType::Total);
    contract.cost_cap_amount = Some(dec!(5_000));

    let output = process_deal(deal, contract, create_state()).unwrap();
    let tracking = output.payg_tracking.unwrap();
    assert_eq!(tracking.arr_contribution_this_deal.as_decimal(), dec!(5_000.00));
    assert_eq!(output.calculations.finalis_commissions.as_decimal(), dec!(0.00));
    assert!(!output.state_changes.entered_commissions_mode);
    assert_eq!(output.calculations.amount_not_charged_due_to_cap.as_decimal(), dec!(20_000.00));
}

/// Scenario 6: regular debt plus a deferred-year amount, collected
/// together, zeroing out the broker's payout.
#[test]
fn scenario_debt_plus_deferred_partial() {
    let deal = create_deal(dec!(50_000), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

    let mut contract = create_contract(RateType::Fixed);
    contract.fixed_rate = Some(dec!(0.05));
    contract.contract_start_date = Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

    let mut state = create_state();
    state.current_debt = dec!(30_000);
    state.deferred_schedule.push(DeferredScheduleEntry { year: 1, amount: dec!(40_000) });

    let output = process_deal(deal, contract, state).unwrap();
    assert_eq!(output.calculations.debt_collected.as_decimal(), dec!(50_000.00));
    assert_eq!(output.updated_contract_state.current_debt.as_decimal(), dec!(0.00));
    assert_eq!(output.calculations.net_payout.as_decimal(), dec!(0.00));
    assert_eq!(
        output.updated_future_payments.len(),
        0,
        "no future subscription payments were configured"
    );
}

#[test]
fn json_round_trip_produces_two_decimal_monetary_fields() {
    let deal = create_deal(dec!(100_000), default_date());
    let mut contract = create_contract(RateType::Fixed);
    contract.fixed_rate = Some(dec!(0.05));
    let state = create_state();

    let deal_json = serde_json::to_string(&deal).unwrap();
    let contract_json = serde_json::to_string(&contract).unwrap();
    let state_json = serde_json::to_string(&state).unwrap();

    let result = commission_engine::process_deal_json(&deal_json, &contract_json, &state_json);
    assert!(result.is_ok());
    let output_json = result.unwrap();
    assert!(output_json.contains("\"net_payout\""));
    // Two-decimal emission, not raw full-precision decimals.
    assert!(output_json.contains("\"finalis_commissions\":\"5000.00\""));
}

#[test]
fn future_subscription_payments_are_prepaid_and_reported() {
    let deal = create_deal(dec!(100_000), default_date());
    let mut contract = create_contract(RateType::Fixed);
    contract.fixed_rate = Some(dec!(0.10));

    let mut state = create_state();
    state.future_subscription_fees.push(SubscriptionPayment {
        payment_id: "sub-1".to_string(),
        due_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        amount_due: dec!(4_000),
        amount_paid: dec!(0),
    });

    let output = process_deal(deal, contract, state).unwrap();
    assert_eq!(output.calculations.advance_fees_created.as_decimal(), dec!(4_000.00));
    assert_eq!(output.calculations.finalis_commissions.as_decimal(), dec!(6_000.00));
    let sub = &output.updated_future_payments[0];
    assert_eq!(sub.amount_paid, dec!(4_000));
}

#[test]
fn determinism_same_input_produces_identical_output() {
    let deal = create_deal(dec!(250_000), default_date());
    let mut contract = create_contract(RateType::Fixed);
    contract.fixed_rate = Some(dec!(0.03));
    let state = create_state();

    let first = process_deal(deal.clone(), contract.clone(), state.clone()).unwrap();
    let second = process_deal(deal, contract, state).unwrap();
    assert_eq!(first, second);
}
