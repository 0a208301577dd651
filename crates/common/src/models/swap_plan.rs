use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Intent {
    Buy,
    Sell,
}

/// One trade leg routed through the plan's base asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapAction {
    pub src: String,
    pub dst: String,
    /// Source units for a sell, destination units for a buy.
    pub amount: f64,
    pub intent: Intent,
    #[serde(default)]
    pub min_receive: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

impl SwapAction {
    pub fn sell(src: &str, dst: &str, amount: f64) -> Self {
        Self {
            src: src.to_string(),
            dst: dst.to_string(),
            amount,
            intent: Intent::Sell,
            min_receive: None,
            note: None,
        }
    }

    pub fn buy(src: &str, dst: &str, amount: f64) -> Self {
        Self {
            intent: Intent::Buy,
            ..Self::sell(src, dst, amount)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseFunding {
    pub base_balance_start: f64,
    pub wallet_base_available: f64,
    pub from_sells: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapPlan {
    pub base: String,
    pub sells_to_base: Vec<SwapAction>,
    pub buys_from_base: Vec<SwapAction>,
    pub base_funding: BaseFunding,
    pub base_pool_start: f64,
    pub base_needed_for_buys: f64,
    pub base_delta_target: f64,
    pub base_pool_end: f64,
    pub shortfall: f64,
    pub warnings: Vec<String>,
}

impl SwapPlan {
    pub fn legs(&self) -> impl Iterator<Item = &SwapAction> {
        self.sells_to_base.iter().chain(self.buys_from_base.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.sells_to_base.is_empty() && self.buys_from_base.is_empty()
    }
}
