//! Commission Pipeline Phases
//!
//! The engine processes a deal through 9 sequential phases:
//!
//! | Phase | Name             | Purpose                                        |
//! |-------|------------------|-------------------------------------------------|
//! | P0    | Validator        | Reject malformed input before any arithmetic   |
//! | P1    | Fee Calculator   | FINRA, distribution, sourcing fees             |
//! | P2    | Implied Cost     | Preferred/exempt/Lehman/fixed rate derivation  |
//! | P3    | Debt Collector   | Regular + deferred debt, credit generation     |
//! | P4    | Credit Applicator| Apply existing credit (standard only)          |
//! | P5    | Subscription     | Forced-advance prepayment (standard only)      |
//! | P6    | Commission Calc  | Standard residual vs PAYG ARR/excess split     |
//! | P7    | Cost-Cap Enforcer| Clamp chargeable total against the cap         |
//! | P8    | Assembler        | Net payout, rolled counters, final response    |
//!
//! Each phase is a pure function that consumes the previous phase's
//! typed context by value and returns a new one — the staged ordering is
//! load-bearing, so this is expressed at the type level rather than as
//! methods mutating one shared, mutable context.

pub mod p0_validate;
pub mod p1_fees;
pub mod p2_implied_cost;
pub mod p3_debt;
pub mod p4_credit;
pub mod p5_subscription;
pub mod p6_commission;
pub mod p7_cost_cap;
pub mod p8_assemble;

pub use p0_validate::{validate_deal, ValidatedDeal};
pub use p1_fees::{compute_fees, FeesComputedDeal};
pub use p2_implied_cost::{compute_implied_cost, ImpliedCostDeal};
pub use p3_debt::{collect_debt_phase, DebtCollectedDeal};
pub use p4_credit::{apply_credit, CreditAppliedDeal};
pub use p5_subscription::{apply_subscription, SubscriptionAppliedDeal};
pub use p6_commission::{compute_commission, CommissionComputedDeal};
pub use p7_cost_cap::{enforce_cost_cap, CostCapEnforcedDeal};
pub use p8_assemble::assemble;

use crate::types::{CommissionResult, Contract, ContractState, Deal, EngineOutput};

/// Execute the complete pipeline for a single deal.
///
/// This is the main entry point: it threads the deal, contract, and
/// contract state through all nine phases in strict order and returns
/// the assembled response. Inputs are moved in by value; the caller's
/// original structures are never aliased or mutated.
pub fn execute_pipeline(
    deal: Deal,
    contract: Contract,
    state: ContractState,
) -> CommissionResult<EngineOutput> {
    let validated = validate_deal(deal, contract, state)?;
    let fees = compute_fees(validated)?;
    let implied = compute_implied_cost(fees)?;
    let debt = collect_debt_phase(implied)?;
    let credit = apply_credit(debt)?;
    let subscription = apply_subscription(credit)?;
    let commission = compute_commission(subscription)?;
    let capped = enforce_cost_cap(commission)?;
    assemble(capped)
}
