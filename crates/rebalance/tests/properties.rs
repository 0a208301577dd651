//! Property tests for the allocation diff engine.

use common::models::{AllocationVector, SwapAction, SwapPlan};
use proptest::prelude::*;
use rebalance::{ChangeType, derive_changes, normalize, stability_score};

const SYMBOLS: &[&str] = &[
    "USDT", "USDC", "DAI", "BUSD", "FDUSD", "TUSD", "USDP", "PYUSD", "USDD", "GUSD",
];

// Strategy for a vector over a random subset of the known symbols
fn vector_strategy() -> impl Strategy<Value = AllocationVector> {
    prop::collection::vec((0..SYMBOLS.len(), 0.0f64..1.0), 0..SYMBOLS.len())
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(i, f)| (SYMBOLS[i], f))
                .collect::<AllocationVector>()
        })
}

// Strategy for legs drawn from the symbols of `current`
fn plan_strategy(current: AllocationVector) -> impl Strategy<Value = (AllocationVector, SwapPlan)> {
    let symbols: Vec<String> = current.symbols().map(str::to_string).collect();
    let n = symbols.len().max(1);
    let legs = prop::collection::vec((0..n, 0.0f64..10_000.0, any::<bool>()), 0..8usize);

    legs.prop_map(move |legs| {
        let mut plan = SwapPlan {
            base: "USDC".to_string(),
            ..SwapPlan::default()
        };
        for (i, amount, is_sell) in legs {
            let Some(symbol) = symbols.get(i) else { continue };
            if is_sell {
                plan.sells_to_base.push(SwapAction::sell(symbol, "USDC", amount));
            } else {
                plan.buys_from_base.push(SwapAction::buy("USDC", symbol, amount));
            }
        }
        (current.clone(), plan)
    })
}

fn inputs() -> impl Strategy<Value = (AllocationVector, AllocationVector, SwapPlan)> {
    (vector_strategy(), vector_strategy()).prop_flat_map(|(current, suggested)| {
        plan_strategy(current).prop_map(move |(current, plan)| (current, suggested.clone(), plan))
    })
}

fn rank(change_type: ChangeType) -> u8 {
    match change_type {
        ChangeType::Sell => 0,
        ChangeType::Buy => 1,
        ChangeType::NoChange => 2,
    }
}

proptest! {
    #[test]
    fn one_record_per_current_symbol((current, suggested, plan) in inputs()) {
        let changes = derive_changes(&current, &suggested, &plan);

        prop_assert_eq!(changes.len(), current.len());
        for symbol in current.symbols() {
            prop_assert_eq!(changes.iter().filter(|c| c.coin == symbol).count(), 1);
        }
    }

    #[test]
    fn sells_then_buys_then_unchanged((current, suggested, plan) in inputs()) {
        let changes = derive_changes(&current, &suggested, &plan);

        for pair in changes.windows(2) {
            prop_assert!(
                rank(pair[0].change_type) <= rank(pair[1].change_type),
                "{:?} listed before {:?}", pair[0].change_type, pair[1].change_type
            );
        }
    }

    #[test]
    fn derive_changes_is_deterministic((current, suggested, plan) in inputs()) {
        prop_assert_eq!(
            derive_changes(&current, &suggested, &plan),
            derive_changes(&current, &suggested, &plan)
        );
    }

    #[test]
    fn normalize_is_repeatable(vector in vector_strategy()) {
        prop_assert_eq!(normalize(&vector), normalize(&vector));
    }

    #[test]
    fn normalize_is_sorted_and_scaled(vector in vector_strategy()) {
        let series = normalize(&vector);

        prop_assert_eq!(series.len(), vector.len());
        for pair in series.windows(2) {
            prop_assert!(pair[0].value >= pair[1].value);
        }
        for slice in &series {
            prop_assert!((0.0..=100.0).contains(&slice.value));
        }
    }

    #[test]
    fn stability_is_bounded(
        entries in prop::collection::vec((0..SYMBOLS.len(), -5.0f64..5.0), 0..SYMBOLS.len())
    ) {
        let vector: AllocationVector = entries.into_iter().map(|(i, f)| (SYMBOLS[i], f)).collect();
        let score = stability_score(&vector);

        prop_assert!(score <= 100);
        prop_assert_eq!(score, stability_score(&vector));
    }
}
