//! WebAssembly bindings for the commission engine.
//!
//! Provides WASM-compatible entry points for running the engine from
//! JavaScript/TypeScript environments. This is a transport seam like any
//! other: it hands the engine a decoded request and serializes the
//! result, exactly the way a native caller's `process_deal_json` does.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { process_deal_wasm } from 'commission-engine';
//!
//! await init();
//!
//! const result = process_deal_wasm(dealJson, contractJson, stateJson);
//! const output = JSON.parse(result);
//! console.log('Net payout:', output.calculations?.net_payout);
//! ```

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::engine::process_deal_json;

/// Initialize panic hook for better error messages in WASM.
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn wasm_init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Process a single deal from JSON inputs.
///
/// # Arguments
///
/// * `deal_json` - JSON string containing the `Deal`
/// * `contract_json` - JSON string containing the `Contract`
/// * `state_json` - JSON string containing the `ContractState`
///
/// # Returns
///
/// JSON string containing either:
/// - Success: the `EngineOutput` object
/// - Error: `{"error": "error message"}`
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn process_deal_wasm(deal_json: &str, contract_json: &str, state_json: &str) -> String {
    match process_deal_json(deal_json, contract_json, state_json) {
        Ok(output_json) => output_json,
        Err(error_msg) => serde_json::json!({
            "error": error_msg,
            "success": false
        })
        .to_string(),
    }
}

/// Validate a deal/contract/state triple without running the full
/// pipeline.
///
/// # Returns
///
/// JSON string containing:
/// - `{"valid": true}` on success
/// - `{"valid": false, "error": "...", "field": "..."}` on validation failure
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn validate_deal_wasm(deal_json: &str, contract_json: &str, state_json: &str) -> String {
    use crate::types::{CommissionError, Contract, ContractState, Deal};

    let deal: Result<Deal, _> = serde_json::from_str(deal_json);
    let contract: Result<Contract, _> = serde_json::from_str(contract_json);
    let state: Result<ContractState, _> = serde_json::from_str(state_json);

    match (deal, contract, state) {
        (Ok(deal), Ok(contract), Ok(state)) => match crate::engine::validate_deal(deal, contract, state) {
            Ok(()) => serde_json::json!({ "valid": true }).to_string(),
            Err(e) => {
                let (message, field) = match e {
                    CommissionError::Validation { message, field } => (message, field),
                    CommissionError::Internal { message, .. } => (message, None),
                };
                serde_json::json!({
                    "valid": false,
                    "error": message,
                    "field": field
                })
                .to_string()
            }
        },
        (Err(e), _, _) => serde_json::json!({
            "valid": false,
            "error": format!("Failed to parse deal: {e}"),
            "field": null
        })
        .to_string(),
        (_, Err(e), _) => serde_json::json!({
            "valid": false,
            "error": format!("Failed to parse contract: {e}"),
            "field": null
        })
        .to_string(),
        (_, _, Err(e)) => serde_json::json!({
            "valid": false,
            "error": format!("Failed to parse contract state: {e}"),
            "field": null
        })
        .to_string(),
    }
}

/// Get engine version.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn get_version() -> String {
    crate::engine::engine_version().to_string()
}

/// Get engine info as JSON.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn get_engine_info() -> String {
    let info = crate::engine::engine_info();
    serde_json::json!({
        "version": info.version,
        "name": info.name,
        "features": info.features,
        "target": "wasm32"
    })
    .to_string()
}

// Non-WASM stub so the crate still exposes a uniform `process_deal_wasm`
// symbol when built without the `wasm` feature (e.g. under plain `cargo test`).
#[cfg(not(feature = "wasm"))]
pub fn process_deal_wasm(deal_json: &str, contract_json: &str, state_json: &str) -> String {
    crate::engine::process_deal_json(deal_json, contract_json, state_json)
        .unwrap_or_else(|e| format!(r#"{{"error": "{e}"}}"#))
}
