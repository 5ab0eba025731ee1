//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the capacity, round-trip and stats invariants of
//! the cache manager over arbitrary operation sequences.

use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tokio_test::block_on;

use crate::cache::{CacheManager, SetOutcome};
use crate::error::CacheError;

// == Strategies ==
/// Generates valid cache keys (non-empty)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}".prop_map(|s| s)
}

/// Generates arbitrary JSON values, including falsy scalars and nesting
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-4000i32..4000).prop_map(|n| Value::from(f64::from(n) / 4.0)),
        "[ -~]{0,24}".prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Value },
    Delete { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => (valid_key_strategy(), json_value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        3 => valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => Just(CacheOp::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any stored JSON value reads back deep-equal.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in json_value_strategy()) {
        let cache = CacheManager::in_memory(10);

        block_on(cache.set(&key, value.clone())).unwrap();
        let retrieved = block_on(cache.get(&key)).unwrap();

        prop_assert_eq!(retrieved, Some(value), "Round-trip value mismatch");
    }

    // The item count never exceeds max_size, and a refused set changes nothing.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((valid_key_strategy(), json_value_strategy()), 1..60),
        max_size in 1usize..8,
    ) {
        let cache = CacheManager::in_memory(max_size);

        for (key, value) in entries {
            let before = block_on(cache.size()).unwrap();
            match block_on(cache.set(&key, value)) {
                Ok(_) => {}
                Err(CacheError::CapacityExceeded { .. }) => {
                    prop_assert_eq!(before, max_size);
                    prop_assert_eq!(block_on(cache.size()).unwrap(), before);
                    prop_assert!(!block_on(cache.has(&key)).unwrap());
                }
                Err(e) => prop_assert!(false, "Unexpected error: {}", e),
            }
            prop_assert!(block_on(cache.size()).unwrap() <= max_size);
        }
    }

    // Updating an existing key at capacity succeeds without consuming space.
    #[test]
    fn prop_update_bypasses_admission(
        keys in prop::collection::hash_set(valid_key_strategy(), 1..6),
        value in json_value_strategy(),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let cache = CacheManager::in_memory(keys.len());
        for key in &keys {
            block_on(cache.set(key, Value::Bool(true))).unwrap();
        }

        for key in &keys {
            let outcome = block_on(cache.set(key, value.clone())).unwrap();
            prop_assert_eq!(outcome, SetOutcome::Updated);
            prop_assert_eq!(block_on(cache.size()).unwrap(), keys.len());
        }
    }

    // remaining_space tracks max_size - size after any operation sequence,
    // and the set of present keys matches a simple model.
    #[test]
    fn prop_stats_match_model(
        ops in prop::collection::vec(cache_op_strategy(), 1..50),
        max_size in 1usize..12,
    ) {
        let cache = CacheManager::in_memory(max_size);
        let mut model: HashSet<String> = HashSet::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    if block_on(cache.set(&key, value)).is_ok() {
                        model.insert(key);
                    }
                }
                CacheOp::Delete { key } => {
                    let removed = block_on(cache.delete(&key)).unwrap();
                    prop_assert_eq!(removed, model.remove(&key));
                }
                CacheOp::Clear => {
                    block_on(cache.clear()).unwrap();
                    model.clear();
                }
            }

            let stats = block_on(cache.stats()).unwrap();
            prop_assert_eq!(stats.total_items, model.len());
            prop_assert_eq!(stats.remaining_space, max_size.saturating_sub(model.len()));
            prop_assert_eq!(stats.oldest_item_timestamp.is_some(), !model.is_empty());
        }
    }
}
