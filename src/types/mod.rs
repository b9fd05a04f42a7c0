//! Type definitions for the commission engine.
//!
//! # Module Organization
//!
//! - `deal` - The immutable per-call deal input
//! - `contract` - Contract configuration and the evolving contract state
//! - `money` - Precise financial primitives (`Money`, `Rate`)
//! - `output` - The response shape returned to the caller

pub mod contract;
pub mod deal;
pub mod money;
pub mod output;

pub use contract::{
    Contract, ContractState, CostCapType, DeferredScheduleEntry, LehmanTier, RateType,
    SubscriptionPayment,
};
pub use deal::Deal;
pub use money::*;
pub use output::*;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two terminal error kinds the engine can surface. A transport layer
/// maps `Validation` to HTTP 400 and `Internal` to HTTP 500.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum CommissionError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Internal error in phase {phase}: {message}")]
    Internal { message: String, phase: String },
}

impl CommissionError {
    pub fn validation(message: impl Into<String>) -> Self {
        CommissionError::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        CommissionError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn internal(message: impl Into<String>, phase: impl Into<String>) -> Self {
        CommissionError::Internal {
            message: message.into(),
            phase: phase.into(),
        }
    }
}

/// Result type alias for engine operations.
pub type CommissionResult<T> = Result<T, CommissionError>;

/// Decimal extension trait for financial calculations.
pub trait DecimalExt {
    /// Round to 2 decimal places, half-up (the rounding mandated for every
    /// emitted boundary value).
    fn round_money(self) -> Decimal;
    /// Round to `dp` decimal places, half-up.
    fn round_half_up_dp(self, dp: u32) -> Decimal;
    /// Clamp to zero (no negatives allowed past this point).
    fn clamp_zero(self) -> Decimal;
}

impl DecimalExt for Decimal {
    fn round_money(self) -> Decimal {
        money::round_half_up(self, 2)
    }

    fn round_half_up_dp(self, dp: u32) -> Decimal {
        money::round_half_up(self, dp)
    }

    fn clamp_zero(self) -> Decimal {
        self.max(Decimal::ZERO)
    }
}
