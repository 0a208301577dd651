use std::cmp::Ordering;

use common::models::{AllocationVector, SwapPlan};
use serde::Serialize;

use crate::engine::{round2, to_percent};

/// Declaration order is display order: sells, then buys, then untouched assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Sell,
    Buy,
    #[serde(rename = "none")]
    NoChange,
}

/// Per-asset action shown in the rebalance list. Percentages are on the 0..100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationChange {
    pub coin: String,
    pub from: f64,
    pub to: f64,
    pub change: f64,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl AllocationChange {
    fn trade(
        coin: &str,
        change_type: ChangeType,
        amount: f64,
        current: &AllocationVector,
        suggested: &AllocationVector,
    ) -> Self {
        let from = to_percent(current.fraction(coin));
        let to = to_percent(suggested.fraction(coin));
        Self {
            coin: coin.to_string(),
            from,
            to,
            change: round2(to - from),
            change_type,
            action: action_text(change_type, amount, coin),
            amount: Some(amount),
        }
    }

    fn unchanged(coin: &str, percent: f64) -> Self {
        Self {
            coin: coin.to_string(),
            from: percent,
            to: percent,
            change: 0.0,
            change_type: ChangeType::NoChange,
            action: "No change".to_string(),
            amount: None,
        }
    }

    /// Adds another leg for the same coin. Legs of the opposite side are ignored:
    /// the first side a coin is seen on decides its record.
    fn absorb(&mut self, change_type: ChangeType, amount: f64) {
        if self.change_type != change_type {
            return;
        }
        let total = self.amount.unwrap_or(0.0) + amount;
        self.amount = Some(total);
        self.action = action_text(change_type, total, &self.coin);
    }
}

fn action_text(change_type: ChangeType, amount: f64, coin: &str) -> String {
    match change_type {
        ChangeType::Sell => format!("Sell {:.2} {}", round2(amount), coin),
        ChangeType::Buy => format!("Buy {:.2} {}", round2(amount), coin),
        ChangeType::NoChange => "No change".to_string(),
    }
}

/// Builds the ordered action list for a preview.
///
/// Sell legs contribute their `src`, buy legs their `dst`; every other symbol of
/// `current` gets a "No change" record. The result is ordered sells, buys, then
/// unchanged assets, larger trades first inside a group, records without an
/// amount last, and emission order for whatever is still tied.
pub fn derive_changes(
    current: &AllocationVector,
    suggested: &AllocationVector,
    plan: &SwapPlan,
) -> Vec<AllocationChange> {
    let mut changes: Vec<AllocationChange> =
        Vec::with_capacity(current.len() + plan.sells_to_base.len() + plan.buys_from_base.len());

    let legs = plan
        .sells_to_base
        .iter()
        .map(|leg| (leg.src.as_str(), ChangeType::Sell, leg.amount))
        .chain(
            plan.buys_from_base
                .iter()
                .map(|leg| (leg.dst.as_str(), ChangeType::Buy, leg.amount)),
        );

    for (coin, change_type, amount) in legs {
        match changes.iter_mut().find(|c| c.coin == coin) {
            Some(existing) => existing.absorb(change_type, amount),
            None => changes.push(AllocationChange::trade(
                coin,
                change_type,
                amount,
                current,
                suggested,
            )),
        }
    }

    for (coin, fraction) in current.iter() {
        if !changes.iter().any(|c| c.coin == coin) {
            changes.push(AllocationChange::unchanged(coin, to_percent(fraction)));
        }
    }

    changes.sort_by(display_order);
    changes
}

fn display_order(a: &AllocationChange, b: &AllocationChange) -> Ordering {
    a.change_type
        .cmp(&b.change_type)
        .then_with(|| match (a.amount, b.amount) {
            (Some(x), Some(y)) => y.abs().partial_cmp(&x.abs()).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}
