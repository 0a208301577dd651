use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::engine::round2;

/// Share of the input that reaches the destination after the bridge fee.
const RECEIVE_RATIO: f64 = 0.999;
const ETHEREUM_GAS_USD: f64 = 12.50;
const L2_GAS_USD: f64 = 0.50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Chain {
    Ethereum,
    Polygon,
    Arbitrum,
    Optimism,
    Base,
    Bsc,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown chain: {0}")]
pub struct UnknownChain(pub String);

impl Chain {
    pub const ALL: [Chain; 6] = [
        Chain::Ethereum,
        Chain::Polygon,
        Chain::Arbitrum,
        Chain::Optimism,
        Chain::Base,
        Chain::Bsc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Chain::Ethereum => "Ethereum",
            Chain::Polygon => "Polygon",
            Chain::Arbitrum => "Arbitrum",
            Chain::Optimism => "Optimism",
            Chain::Base => "Base",
            Chain::Bsc => "BSC",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = UnknownChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chain::ALL
            .into_iter()
            .find(|chain| chain.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownChain(s.to_string()))
    }
}

/// Estimate shown next to the manual swap form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapQuote {
    pub amount: f64,
    pub estimated_receive: f64,
    pub gas_estimate_usd: f64,
}

impl SwapQuote {
    pub fn estimate(amount: f64, from_chain: Chain) -> Self {
        let estimated_receive = if amount.is_finite() && amount > 0.0 {
            round2(amount * RECEIVE_RATIO)
        } else {
            0.0
        };
        let gas_estimate_usd = match from_chain {
            Chain::Ethereum => ETHEREUM_GAS_USD,
            _ => L2_GAS_USD,
        };

        Self {
            amount,
            estimated_receive,
            gas_estimate_usd,
        }
    }
}
