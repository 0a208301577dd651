use std::cmp::Ordering;

use common::models::AllocationVector;
use serde::Serialize;

use crate::engine::to_percent;
use crate::palette::token_color;

/// One slice of an allocation pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    /// Percentage of the portfolio, 0..100, two decimals.
    pub value: f64,
    pub color: &'static str,
}

/// Converts an allocation vector into chart slices, largest first.
///
/// Ties keep the vector's iteration order.
pub fn normalize(vector: &AllocationVector) -> Vec<ChartSlice> {
    let mut series: Vec<ChartSlice> = vector
        .iter()
        .map(|(symbol, fraction)| ChartSlice {
            name: symbol.to_string(),
            value: to_percent(fraction),
            color: token_color(symbol),
        })
        .collect();

    series.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    series
}
