use chrono::{DateTime, Utc};
use common::models::{AllocationVector, RebalancePreview, SwapAction, SwapPlan};
use serde::Deserialize;

use crate::error::{PlannerError, ValidationError};
use crate::traits::RemoteResponse;

/// Body of `POST /rebalance/preview` as the planner sends it.
#[derive(Deserialize, Debug)]
pub struct RebalanceResponse {
    pub ok: bool,
    #[serde(default)]
    pub current_allocation: AllocationVector,
    #[serde(default)]
    pub suggested_allocation: AllocationVector,
    #[serde(default)]
    pub trade_deltas: AllocationVector,
    #[serde(default)]
    pub swap_plan: Option<SwapPlan>,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error envelope of a non-2xx response.
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl RemoteResponse<RebalancePreview> for RebalanceResponse {
    fn validate(self, received_at: DateTime<Utc>) -> Result<RebalancePreview, PlannerError> {
        if !self.ok {
            return Err(PlannerError::rejected(self.error));
        }

        let swap_plan = self.swap_plan.ok_or(ValidationError::MissingSwapPlan)?;

        check_fractions("current", &self.current_allocation)?;
        check_fractions("suggested", &self.suggested_allocation)?;
        check_legs("sell", &swap_plan.sells_to_base, |leg| &leg.src)?;
        check_legs("buy", &swap_plan.buys_from_base, |leg| &leg.dst)?;

        Ok(RebalancePreview {
            current: self.current_allocation,
            suggested: self.suggested_allocation,
            trade_deltas: self.trade_deltas,
            swap_plan,
            rationale: self.rationale.filter(|r| !r.trim().is_empty()),
            fetched_at: received_at,
        })
    }
}

fn check_fractions(vector: &'static str, allocation: &AllocationVector) -> Result<(), ValidationError> {
    match allocation.iter().find(|(_, fraction)| !fraction.is_finite()) {
        Some((symbol, _)) => Err(ValidationError::InvalidFraction {
            vector,
            symbol: symbol.to_string(),
        }),
        None => Ok(()),
    }
}

/// `asset` picks the side of the leg the engine reads for this list.
fn check_legs(
    side: &'static str,
    legs: &[SwapAction],
    asset: impl Fn(&SwapAction) -> &String,
) -> Result<(), ValidationError> {
    for leg in legs {
        let symbol = asset(leg);
        if symbol.trim().is_empty() {
            return Err(ValidationError::EmptySymbol { side });
        }
        if !leg.amount.is_finite() || leg.amount < 0.0 {
            return Err(ValidationError::InvalidAmount {
                symbol: symbol.clone(),
                amount: leg.amount,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PREVIEW: &str = r#"{
        "ok": true,
        "current_allocation": {"USDT": 0.5, "USDC": 0.3, "DAI": 0.15, "FDUSD": 0.05},
        "suggested_allocation": {"USDT": 0.4, "USDC": 0.4, "DAI": 0.15, "FDUSD": 0.05},
        "trade_deltas": {"USDT": -0.1, "USDC": 0.1},
        "swap_plan": {
            "base": "USDC",
            "sells_to_base": [{"src": "USDT", "dst": "USDC", "amount": 10.0, "intent": "SELL", "min_receive": 9.9, "note": null}],
            "buys_from_base": [],
            "base_funding": {"base_balance_start": 300.0, "wallet_base_available": 300.0, "from_sells": 10.0},
            "base_pool_start": 310.0,
            "base_needed_for_buys": 10.0,
            "base_delta_target": 0.0,
            "base_pool_end": 300.0,
            "shortfall": 0.0,
            "warnings": []
        },
        "rationale": "Balance USDT and USDC",
        "error": null
    }"#;

    fn parse(json: &str) -> RebalanceResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_preview() {
        let at = Utc.with_ymd_and_hms(2025, 10, 20, 9, 30, 0).unwrap();
        let preview = parse(PREVIEW).validate(at).unwrap();

        assert_eq!(preview.current.len(), 4);
        assert_eq!(preview.current.symbols().next(), Some("USDT"));
        assert_eq!(preview.suggested.fraction("USDC"), 0.4);
        assert_eq!(preview.trade_deltas.fraction("USDT"), -0.1);
        assert_eq!(preview.swap_plan.base, "USDC");
        assert_eq!(preview.swap_plan.sells_to_base[0].min_receive, Some(9.9));
        assert_eq!(preview.swap_plan.base_funding.from_sells, 10.0);
        assert_eq!(preview.rationale.as_deref(), Some("Balance USDT and USDC"));
        assert_eq!(preview.fetched_at, at);
    }

    #[test]
    fn test_not_ok_surfaces_server_error() {
        let err = parse(r#"{"ok": false, "error": "balances too small"}"#)
            .validate_now()
            .unwrap_err();
        assert_eq!(err.to_string(), "balances too small");

        let err = parse(r#"{"ok": false}"#).validate_now().unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch rebalance data");
    }

    #[test]
    fn test_missing_plan_is_rejected() {
        let err = parse(r#"{"ok": true, "current_allocation": {"USDT": 1.0}}"#)
            .validate_now()
            .unwrap_err();
        assert!(matches!(err, PlannerError::Invalid(ValidationError::MissingSwapPlan)));
    }

    #[test]
    fn test_optional_fields_default() {
        let preview = parse(r#"{"ok": true, "swap_plan": {"base": "USDC"}, "rationale": ""}"#)
            .validate_now()
            .unwrap();

        assert!(preview.current.is_empty());
        assert!(preview.swap_plan.is_empty());
        assert_eq!(preview.rationale, None);
    }

    #[test]
    fn test_negative_leg_amount_is_rejected() {
        let err = parse(
            r#"{"ok": true, "swap_plan": {"base": "USDC",
                "sells_to_base": [{"src": "DAI", "dst": "USDC", "amount": -3.0, "intent": "SELL"}]}}"#,
        )
        .validate_now()
        .unwrap_err();

        assert!(matches!(
            err,
            PlannerError::Invalid(ValidationError::InvalidAmount { ref symbol, .. }) if symbol == "DAI"
        ));
    }

    #[test]
    fn test_empty_buy_symbol_is_rejected() {
        let err = parse(
            r#"{"ok": true, "swap_plan": {"base": "USDC",
                "buys_from_base": [{"src": "USDC", "dst": " ", "amount": 3.0, "intent": "BUY"}]}}"#,
        )
        .validate_now()
        .unwrap_err();

        assert!(matches!(
            err,
            PlannerError::Invalid(ValidationError::EmptySymbol { side: "buy" })
        ));
    }
}
