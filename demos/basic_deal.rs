//! Basic Deal Example
//!
//! Demonstrates running the commission engine against a single fixed-rate
//! deal with a partially exhausted annual cost cap.
//!
//! Run with: `cargo run --example basic_deal`.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use commission_engine::prelude::*;
use commission_engine::{Contract, ContractState, CostCapType, Deal, RateType};

fn main() {
    println!("=== Commission Engine Basic Deal Example ===\n");

    let deal = Deal {
        deal_name: "Acme Capital / Example Target LLC".to_string(),
        success_fees: dec!(500_000),
        deal_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        is_distribution_fee_true: false,
        is_sourcing_fee_true: false,
        is_deal_exempt: false,
        has_finra_fee: true,
        external_retainer: dec!(0),
        has_external_retainer: false,
        include_retainer_in_fees: None,
        has_preferred_rate: false,
        preferred_rate: None,
    };

    println!("Deal:");
    println!("  Name: {}", deal.deal_name);
    println!("  Success Fees: ${}", deal.success_fees);
    println!("  Date: {}", deal.deal_date);
    println!();

    let contract = Contract {
        rate_type: RateType::Fixed,
        fixed_rate: Some(dec!(0.05)),
        lehman_tiers: vec![],
        accumulated_success_fees_before_this_deal: dec!(0),
        contract_start_date: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        is_pay_as_you_go: false,
        annual_subscription: dec!(0),
        cost_cap_type: Some(CostCapType::Annual),
        cost_cap_amount: Some(dec!(100_000)),
    };

    let mut state = ContractState {
        current_credit: dec!(0),
        current_debt: dec!(0),
        is_in_commissions_mode: false,
        future_subscription_fees: vec![],
        deferred_schedule: vec![],
        deferred_subscription_fee: dec!(0),
        total_paid_this_contract_year: dec!(90_000),
        total_paid_all_time: dec!(90_000),
        payg_commissions_accumulated: dec!(0),
    };

    println!("Contract:");
    println!("  Rate Type: {}", contract.rate_type);
    println!("  Fixed Rate: {}%", contract.fixed_rate.unwrap_or_default() * dec!(100));
    println!(
        "  Cost Cap: ${} ({})",
        contract.cost_cap_amount.unwrap_or_default(),
        contract.cost_cap_type.unwrap()
    );
    println!("  Already Paid This Contract Year: ${}", state.total_paid_this_contract_year);
    println!();

    println!("Running commission engine...");
    match process_deal(deal, contract, state.clone()) {
        Ok(output) => {
            println!("\n=== Calculation Results ===\n");

            let c = &output.calculations;
            println!("Fees:");
            println!("  FINRA Fee: ${}", c.finra_fee);
            println!("  Distribution Fee: ${}", c.distribution_fee);
            println!("  Sourcing Fee: ${}", c.sourcing_fee);
            println!();

            println!("Implied Cost Chain:");
            println!("  Implied Total: ${}", c.implied_total);
            println!("  Debt Collected: ${}", c.debt_collected);
            println!("  Credit Used: ${}", c.credit_used);
            println!("  Implied After Credit: ${}", c.implied_after_credit);
            println!("  Advance Fees Created: ${}", c.advance_fees_created);
            println!("  Implied After Subscription: ${}", c.implied_after_subscription);
            println!();

            println!("Commission & Cap:");
            println!("  Finalis Commissions: ${}", c.finalis_commissions);
            println!("  Cut by Cost Cap: ${}", c.amount_not_charged_due_to_cap);
            println!("  Net Payout: ${}", c.net_payout);
            println!();

            println!("Updated Contract State:");
            let updated = &output.updated_contract_state;
            println!("  Current Credit: ${}", updated.current_credit);
            println!("  Current Debt: ${}", updated.current_debt);
            println!("  In Commissions Mode: {}", updated.is_in_commissions_mode);
            println!("  Total Paid This Contract Year: ${}", updated.total_paid_this_contract_year);
            println!("  Total Paid All Time: ${}", updated.total_paid_all_time);

            // Persist the successor state for the next deal on this contract.
            state.total_paid_this_contract_year = updated.total_paid_this_contract_year.as_decimal();
            state.total_paid_all_time = updated.total_paid_all_time.as_decimal();
        }
        Err(e) => {
            eprintln!("Calculation failed: {}", e);
            std::process::exit(1);
        }
    }
}
