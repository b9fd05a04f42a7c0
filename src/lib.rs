//! # Commission Engine
//!
//! A deterministic, stateless calculation engine for M&A broker-dealer
//! commission processing. Given a single deal, a contract configuration,
//! and the contract's evolving state, the engine produces a full fee and
//! commission breakdown, the successor contract state for the caller to
//! persist, and the net payout owed to the broker.
//!
//! ## Features
//!
//! - **Pure functions** - every pipeline phase is side-effect free and
//!   operates on owned values; nothing is shared across calls.
//! - **Precise math** - `rust_decimal` throughout; no binary floats touch
//!   a monetary value anywhere in the pipeline.
//! - **WASM support** - compiles to WebAssembly for a browser/Node
//!   transport layer to call directly.
//!
//! ## Architecture
//!
//! The engine is a nine-phase pipeline, each phase a pure function
//! consuming the previous phase's typed output by value:
//!
//! ```text
//! Deal/Contract/State -> P0: Validate
//!                      -> P1: Fees (FINRA, distribution, sourcing)
//!                      -> P2: Implied Cost (preferred/exempt/Lehman/fixed)
//!                      -> P3: Debt Collection (regular + deferred)
//!                      -> P4: Credit Application
//!                      -> P5: Subscription Prepayment
//!                      -> P6: Commission (standard vs PAYG)
//!                      -> P7: Cost-Cap Enforcement
//!                      -> P8: Payout & State Assembly
//!                      -> EngineOutput
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use commission_engine::{process_deal, Deal, Contract, ContractState};
//!
//! let output = process_deal(deal, contract, state)?;
//! println!("Net payout: {}", output.calculations.net_payout);
//! ```
//!
//! ## WASM Usage
//!
//! When compiled with `--features wasm`:
//!
//! ```javascript
//! import init, { process_deal_wasm } from 'commission-engine';
//!
//! await init();
//!
//! const result = process_deal_wasm(dealJson, contractJson, stateJson);
//! const output = JSON.parse(result);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Use wee_alloc as the global allocator for WASM builds
#[cfg(all(feature = "wasm", feature = "wee_alloc"))]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Core modules
pub mod types;
pub mod phases;
pub mod algorithms;
pub mod engine;
pub mod wasm;

// Re-export commonly used types
pub use types::{
    // Deal types
    Deal,

    // Contract types
    Contract, ContractState, CostCapType, DeferredScheduleEntry, LehmanTier, RateType,
    SubscriptionPayment,

    // Money types
    Money, Rate,

    // Output types
    Calculations, DealSummary, EngineOutput, PaygTracking, StateChanges, UpdatedContractState,

    // Common types
    CommissionError, CommissionResult, DecimalExt,
};

// Re-export engine functions
pub use engine::{
    engine_info, engine_version, process_deal, process_deal_json, process_deal_with_config,
    validate_deal, EngineConfig, EngineInfo,
};

// Re-export WASM bindings when feature is enabled
#[cfg(feature = "wasm")]
pub use wasm::{get_engine_info, get_version, process_deal_wasm};

/// Prelude module for convenient imports
pub mod prelude {
    //! Commonly used types and traits.
    //!
    //! ```rust,ignore
    //! use commission_engine::prelude::*;
    //! ```

    pub use crate::types::{
        CommissionError, CommissionResult, Contract, ContractState, Deal, DecimalExt, Money,
        Rate,
    };

    pub use crate::engine::{process_deal, validate_deal};

    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
