use std::env;
use std::str::FromStr;
use std::time::Duration;

use common::models::PreviewRequest;
use rebalance::Chain;
use thiserror::Error;

pub const DEFAULT_PLANNER_URL: &str = "https://ethonline2025.onrender.com";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_REFRESH_SECS: u64 = 60;
const DEFAULT_QUOTE_AMOUNT: f64 = 1000.0;

/// Wallet balances posted with every preview request when `WALLET_BALANCES` is unset.
pub const DEFAULT_BALANCES: &[(&str, f64)] = &[
    ("USDC", 1200.0),
    ("USDT", 800.0),
    ("DAI", 500.0),
    ("FDUSD", 300.0),
    ("BUSD", 250.0),
    ("TUSD", 150.0),
    ("USDP", 200.0),
    ("PYUSD", 100.0),
    ("USDD", 400.0),
    ("GUSD", 100.0),
];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid number: {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be greater than zero")]
    NotPositive { var: &'static str },
    #[error("WALLET_BALANCES entry {0:?} is not SYMBOL=amount")]
    InvalidBalance(String),
    #[error("SWAP_FROM_CHAIN: {0}")]
    InvalidChain(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub planner_url: String,
    pub planner_timeout: Duration,
    pub refresh_interval: Duration,
    pub balances: Vec<(String, f64)>,
    pub quote_amount: f64,
    /// Amount and source chain for a one-off manual swap estimate.
    pub manual_swap: Option<(f64, Chain)>,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let planner_url = lookup("PLANNER_URL").unwrap_or_else(|| DEFAULT_PLANNER_URL.to_string());

        let timeout_secs = parse_or(&lookup, "PLANNER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let refresh_secs = parse_or(&lookup, "REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_SECS)?;
        if refresh_secs == 0 {
            return Err(ConfigError::NotPositive {
                var: "REFRESH_INTERVAL_SECS",
            });
        }

        let balances = match lookup("WALLET_BALANCES") {
            Some(raw) => parse_balances(&raw)?,
            None => DEFAULT_BALANCES
                .iter()
                .map(|(symbol, amount)| (symbol.to_string(), *amount))
                .collect(),
        };

        let quote_amount = parse_or(&lookup, "QUOTE_AMOUNT", DEFAULT_QUOTE_AMOUNT)?;

        let manual_swap = match lookup("SWAP_AMOUNT") {
            Some(_) => {
                let amount = parse_or(&lookup, "SWAP_AMOUNT", 0.0)?;
                let chain = match lookup("SWAP_FROM_CHAIN") {
                    Some(raw) => raw
                        .parse::<Chain>()
                        .map_err(|e| ConfigError::InvalidChain(e.to_string()))?,
                    None => Chain::Ethereum,
                };
                Some((amount, chain))
            }
            None => None,
        };

        Ok(Self {
            planner_url,
            planner_timeout: Duration::from_secs(timeout_secs),
            refresh_interval: Duration::from_secs(refresh_secs),
            balances,
            quote_amount,
            manual_swap,
        })
    }

    pub fn preview_request(&self) -> PreviewRequest {
        PreviewRequest::new(self.balances.clone(), self.quote_amount)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        None => Ok(default),
    }
}

/// Parses `USDC=1200,USDT=800`.
fn parse_balances(raw: &str) -> Result<Vec<(String, f64)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (symbol, amount) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidBalance(entry.to_string()))?;
            let symbol = symbol.trim();
            let amount = amount
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidBalance(entry.to_string()))?;
            if symbol.is_empty() || !amount.is_finite() || amount < 0.0 {
                return Err(ConfigError::InvalidBalance(entry.to_string()));
            }
            Ok((symbol.to_uppercase(), amount))
        })
        .collect()
}
