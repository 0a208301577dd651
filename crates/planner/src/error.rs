use thiserror::Error;

pub const DEFAULT_REJECTION: &str = "Failed to fetch rebalance data";

/// A planner payload that decoded but cannot be handed to the engine.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("response has no swap plan")]
    MissingSwapPlan,
    #[error("{vector} allocation for {symbol} is not a finite number")]
    InvalidFraction { vector: &'static str, symbol: String },
    #[error("swap leg for {symbol} has invalid amount {amount}")]
    InvalidAmount { symbol: String, amount: f64 },
    #[error("{side} leg has an empty asset symbol")]
    EmptySymbol { side: &'static str },
}

/// Failures of a preview request. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Request timeout. Server took too long to respond.")]
    Timeout,
    #[error("No response from server. Please check your connection.")]
    NoResponse,
    #[error("Server error ({0})")]
    Status(u16),
    /// Error message carried in a failed HTTP response body.
    #[error("{0}")]
    Server(String),
    /// The planner answered with `ok: false`.
    #[error("{0}")]
    Rejected(String),
    #[error("Failed to parse planner response: {0}")]
    Decode(String),
    #[error("Invalid planner response: {0}")]
    Invalid(#[from] ValidationError),
    #[error("Invalid planner URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("{0}")]
    Transport(String),
}

impl PlannerError {
    pub fn rejected(error: Option<String>) -> Self {
        PlannerError::Rejected(
            error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
        )
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PlannerError::Timeout
        } else if e.is_connect() || e.is_request() {
            PlannerError::NoResponse
        } else if e.is_decode() {
            PlannerError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            PlannerError::Status(status.as_u16())
        } else {
            PlannerError::Transport(e.to_string())
        }
    }
}
