pub const FALLBACK_COLOR: &str = "#94A3B8";

const TOKEN_COLORS: &[(&str, &str)] = &[
    ("USDT", "#26A17B"),
    ("USDC", "#2775CA"),
    ("DAI", "#F5AC37"),
    ("BUSD", "#F0B90B"),
    ("FDUSD", "#8B5CF6"),
    ("TUSD", "#3B82F6"),
    ("USDP", "#10B981"),
    ("PYUSD", "#EC4899"),
    ("USDD", "#EF4444"),
    ("GUSD", "#06B6D4"),
];

/// Chart color for a token symbol. Lookup is exact; unknown symbols share one neutral color.
pub fn token_color(symbol: &str) -> &'static str {
    TOKEN_COLORS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_symbols() {
        assert_eq!(token_color("USDT"), "#26A17B");
        assert_eq!(token_color("GUSD"), "#06B6D4");
        assert_eq!(token_color("usdt"), FALLBACK_COLOR);
        assert_eq!(token_color("WETH"), FALLBACK_COLOR);
    }
}
