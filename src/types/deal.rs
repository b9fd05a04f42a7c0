//! Deal input types - the immutable per-call request fields.
//!
//! A `Deal` is exactly the data the caller supplies about a single
//! broker-dealer transaction. It is never mutated by the pipeline; every
//! phase reads from it and threads it forward untouched.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single M&A broker-dealer deal submitted for commission processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Human-readable deal name (the only identifier allowed in logs).
    pub deal_name: String,
    /// Gross success fee paid by the client on this deal. Must be > 0.
    pub success_fees: Decimal,
    /// Date the deal closed.
    pub deal_date: NaiveDate,

    /// Whether a distribution fee applies.
    pub is_distribution_fee_true: bool,
    /// Whether a sourcing fee applies.
    pub is_sourcing_fee_true: bool,
    /// Whether this deal is exempt from the contract's normal rate and
    /// instead charged the flat exempt rate.
    pub is_deal_exempt: bool,

    /// Whether the FINRA regulatory fee applies. Defaults to `true`.
    #[serde(default = "default_true")]
    pub has_finra_fee: bool,

    /// External retainer amount paid outside this engine. Never flows
    /// through debt or payout; optionally folded into the fee/implied-cost
    /// basis.
    #[serde(default)]
    pub external_retainer: Decimal,
    /// Whether an external retainer exists for this deal.
    #[serde(default)]
    pub has_external_retainer: bool,
    /// Whether the external retainer should be included in the fee/implied
    /// basis. Mandatory (must be explicitly present) whenever
    /// `has_external_retainer` is true.
    pub include_retainer_in_fees: Option<bool>,

    /// Whether a preferred deal-level rate overrides all other rate logic.
    #[serde(default)]
    pub has_preferred_rate: bool,
    /// The preferred rate, in `[0, 1]`, used only when `has_preferred_rate`.
    pub preferred_rate: Option<Decimal>,
}

fn default_true() -> bool {
    true
}

impl Deal {
    /// `success_fees + external_retainer` when the retainer both exists and
    /// is configured to be included in the fee/implied-cost basis;
    /// `success_fees` alone otherwise. Computed once (§4.2/§4.3 of the
    /// spec both reuse this exact basis).
    pub fn retainer_base(&self) -> Decimal {
        if self.has_external_retainer && self.include_retainer_in_fees.unwrap_or(false) {
            self.success_fees + self.external_retainer
        } else {
            self.success_fees
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

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
    fn retainer_base_excludes_retainer_by_default() {
        let deal = base_deal();
        assert_eq!(deal.retainer_base(), dec!(100_000));
    }

    #[test]
    fn retainer_base_includes_retainer_when_configured() {
        let mut deal = base_deal();
        deal.has_external_retainer = true;
        deal.external_retainer = dec!(10_000);
        deal.include_retainer_in_fees = Some(true);
        assert_eq!(deal.retainer_base(), dec!(110_000));
    }

    #[test]
    fn retainer_base_excludes_retainer_when_flagged_off() {
        let mut deal = base_deal();
        deal.has_external_retainer = true;
        deal.external_retainer = dec!(10_000);
        deal.include_retainer_in_fees = Some(false);
        assert_eq!(deal.retainer_base(), dec!(100_000));
    }
}
