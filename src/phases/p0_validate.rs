//! P0 - Validator
//!
//! Rejects malformed input before any arithmetic begins. Every rule here
//! maps directly to a single validation failure; the engine never
//! partially validates and continues.

use rust_decimal::Decimal;

use crate::types::{CommissionError, CommissionResult, Contract, ContractState, Deal, RateType};

/// Deal, contract, and contract state, confirmed structurally sound and
/// within their documented ranges. Nothing downstream re-checks these
/// invariants.
#[derive(Debug, Clone)]
pub struct ValidatedDeal {
    pub deal: Deal,
    pub contract: Contract,
    pub state: ContractState,
}

impl ValidatedDeal {
    pub fn deal(&self) -> &Deal {
        &self.deal
    }
    pub fn contract(&self) -> &Contract {
        &self.contract
    }
    pub fn state(&self) -> &ContractState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut ContractState {
        &mut self.state
    }
}

/// P0: Validate deal, contract, and contract state.
///
/// # Rules Enforced
/// - `success_fees > 0`; `external_retainer`, `current_credit`,
///   `current_debt`, and every payment's `amount_due`/`amount_paid` are
///   non-negative, and `amount_paid <= amount_due`.
/// - Every rate (`fixed_rate`, `preferred_rate`, each Lehman tier's rate)
///   lies in `[0, 1]`.
/// - `fixed_rate` is present iff `rate_type == Fixed`; `lehman_tiers` is
///   non-empty iff `rate_type == Lehman`.
/// - `include_retainer_in_fees` is present whenever `has_external_retainer`.
/// - PAYG contracts enter with zero credit and no future payments.
pub fn validate_deal(
    deal: Deal,
    contract: Contract,
    state: ContractState,
) -> CommissionResult<ValidatedDeal> {
    log::debug!("p0_validate: validating deal {}", deal.deal_name);

    if deal.success_fees <= Decimal::ZERO {
        return Err(CommissionError::validation_field(
            "success_fees must be greater than zero",
            "success_fees",
        ));
    }
    non_negative(deal.external_retainer, "external_retainer")?;
    non_negative(state.current_credit, "state.current_credit")?;
    non_negative(state.current_debt, "state.current_debt")?;

    for payment in &state.future_subscription_fees {
        non_negative(payment.amount_due, "future_subscription_fees[].amount_due")?;
        non_negative(payment.amount_paid, "future_subscription_fees[].amount_paid")?;
        if payment.amount_paid > payment.amount_due {
            return Err(CommissionError::validation_field(
                format!(
                    "payment {} has amount_paid greater than amount_due",
                    payment.payment_id
                ),
                "future_subscription_fees[].amount_paid",
            ));
        }
    }

    if let Some(rate) = contract.fixed_rate {
        unit_fraction(rate, "contract.fixed_rate")?;
    }
    if let Some(rate) = deal.preferred_rate {
        unit_fraction(rate, "preferred_rate")?;
    }
    for tier in &contract.lehman_tiers {
        unit_fraction(tier.rate, "contract.lehman_tiers[].rate")?;
    }

    match contract.rate_type {
        RateType::Fixed if contract.fixed_rate.is_none() => {
            return Err(CommissionError::validation_field(
                "fixed_rate is required when rate_type is fixed",
                "contract.fixed_rate",
            ));
        }
        RateType::Lehman if contract.lehman_tiers.is_empty() => {
            return Err(CommissionError::validation_field(
                "lehman_tiers must be non-empty when rate_type is lehman",
                "contract.lehman_tiers",
            ));
        }
        _ => {}
    }

    if deal.has_external_retainer && deal.include_retainer_in_fees.is_none() {
        return Err(CommissionError::validation_field(
            "include_retainer_in_fees is required when has_external_retainer is true",
            "include_retainer_in_fees",
        ));
    }

    if deal.has_preferred_rate && deal.preferred_rate.is_none() {
        return Err(CommissionError::validation_field(
            "preferred_rate is required when has_preferred_rate is true",
            "preferred_rate",
        ));
    }

    if contract.is_pay_as_you_go {
        if state.current_credit != Decimal::ZERO {
            return Err(CommissionError::validation_field(
                "PAYG contracts must enter with zero current_credit",
                "state.current_credit",
            ));
        }
        if !state.future_subscription_fees.is_empty() {
            return Err(CommissionError::validation_field(
                "PAYG contracts must enter with no future_subscription_fees",
                "state.future_subscription_fees",
            ));
        }
    }

    Ok(ValidatedDeal {
        deal,
        contract,
        state,
    })
}

fn non_negative(value: Decimal, field: &str) -> CommissionResult<()> {
    if value < Decimal::ZERO {
        return Err(CommissionError::validation_field(
            format!("{field} cannot be negative"),
            field.to_string(),
        ));
    }
    Ok(())
}

fn unit_fraction(value: Decimal, field: &str) -> CommissionResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(CommissionError::validation_field(
            format!("{field} must lie within [0, 1]"),
            field.to_string(),
        ));
    }
    Ok(())
}
