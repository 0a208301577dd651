use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::{AllocationVector, SwapPlan};

/// Body of a rebalance preview request.
///
/// Serialized flat, one `<symbol>_balance` field per wallet balance plus
/// `quote_amount`, which is the shape the planning service expects.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRequest {
    pub balances: Vec<(String, f64)>,
    pub quote_amount: f64,
}

impl PreviewRequest {
    pub fn new(balances: Vec<(String, f64)>, quote_amount: f64) -> Self {
        Self {
            balances,
            quote_amount,
        }
    }
}

impl Serialize for PreviewRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.balances.len() + 1))?;
        for (symbol, balance) in &self.balances {
            map.serialize_entry(&format!("{}_balance", symbol.to_lowercase()), balance)?;
        }
        map.serialize_entry("quote_amount", &self.quote_amount)?;
        map.end()
    }
}

/// A planner response that passed boundary validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebalancePreview {
    pub current: AllocationVector,
    pub suggested: AllocationVector,
    pub trade_deltas: AllocationVector,
    pub swap_plan: SwapPlan,
    pub rationale: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_flattens_balances() {
        let request = PreviewRequest::new(
            vec![("USDC".to_string(), 1200.0), ("FDUSD".to_string(), 300.0)],
            1000.0,
        );
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["usdc_balance"], 1200.0);
        assert_eq!(json["fdusd_balance"], 300.0);
        assert_eq!(json["quote_amount"], 1000.0);
        assert_eq!(json.as_object().map(|o| o.len()), Some(3));
    }
}
