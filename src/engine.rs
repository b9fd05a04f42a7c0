//! Main Commission Engine
//!
//! This module provides the primary entry point for running a single
//! deal through the nine-phase commission pipeline.
//!
//! # Usage
//!
//! ```rust,ignore
//! use commission_engine::{process_deal, Deal, Contract, ContractState};
//!
//! let output = process_deal(deal, contract, state)?;
//! println!("Net payout: {}", output.calculations.net_payout);
//! ```

use crate::phases;
use crate::types::{CommissionResult, Contract, ContractState, Deal, EngineOutput};

/// Engine configuration options. Currently a placeholder for future
/// toggles; the engine has no optional behaviors today beyond what
/// `Contract` itself configures.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    /// Enable strict validation mode (reserved; validation is always
    /// strict today, matching `strict_validation` being the crate's only
    /// extra feature flag).
    pub strict_validation: bool,
}

/// Process a single deal through the full pipeline using default engine
/// configuration.
///
/// Takes ownership of `deal`, `contract`, and `state` — none of the
/// caller's structures are aliased or mutated; the engine deep-copies by
/// taking ownership and returns the successor state for the caller to
/// persist.
///
/// # Errors
/// Returns [`CommissionError::Validation`] for any malformed input and
/// [`CommissionError::Internal`] for an arithmetic invariant violation
/// unexpected given validated input.
pub fn process_deal(deal: Deal, contract: Contract, state: ContractState) -> CommissionResult<EngineOutput> {
    process_deal_with_config(deal, contract, state, EngineConfig::default())
}

/// Process a deal with explicit engine configuration.
pub fn process_deal_with_config(
    deal: Deal,
    contract: Contract,
    state: ContractState,
    _config: EngineConfig,
) -> CommissionResult<EngineOutput> {
    log::info!("Commission engine starting: deal {}", deal.deal_name);

    let start_time = std::time::Instant::now();

    let output = phases::execute_pipeline(deal, contract, state)?;

    let duration_ms = start_time.elapsed().as_millis() as u64;
    log::info!(
        "Commission engine completed for {} in {duration_ms}ms",
        output.deal_summary.deal_name
    );

    Ok(output)
}

/// Process a deal from JSON inputs (for FFI/transport boundaries).
///
/// Accepts three top-level JSON objects — `deal`, `contract`, `state` —
/// and returns the JSON-encoded [`EngineOutput`] or a JSON-encoded error
/// message. Monetary fields are serialized with exactly two fractional
/// digits.
pub fn process_deal_json(deal_json: &str, contract_json: &str, state_json: &str) -> Result<String, String> {
    let deal: Deal =
        serde_json::from_str(deal_json).map_err(|e| format!("Failed to parse deal: {e}"))?;
    let contract: Contract =
        serde_json::from_str(contract_json).map_err(|e| format!("Failed to parse contract: {e}"))?;
    let state: ContractState =
        serde_json::from_str(state_json).map_err(|e| format!("Failed to parse contract state: {e}"))?;

    let output = process_deal(deal, contract, state).map_err(|e| format!("Calculation error: {e}"))?;

    serde_json::to_string(&output).map_err(|e| format!("Failed to serialize output: {e}"))
}

/// Validate a deal/contract/state triple without running the full
/// pipeline. Useful for pre-flight checks before committing to a deal.
pub fn validate_deal(deal: Deal, contract: Contract, state: ContractState) -> CommissionResult<()> {
    phases::validate_deal(deal, contract, state)?;
    Ok(())
}

/// Get engine version information.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get engine build information.
pub fn engine_info() -> EngineInfo {
    EngineInfo {
        version: env!("CARGO_PKG_VERSION"),
        name: env!("CARGO_PKG_NAME"),
        features: get_enabled_features(),
    }
}

/// Engine build information.
#[derive(Debug, Clone)]
pub struct EngineInfo {
    pub version: &'static str,
    pub name: &'static str,
    pub features: Vec<&'static str>,
}

fn get_enabled_features() -> Vec<&'static str> {
    let mut features = vec![];

    #[cfg(feature = "wasm")]
    features.push("wasm");

    #[cfg(feature = "strict_validation")]
    features.push("strict_validation");

    features
}
