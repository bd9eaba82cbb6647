//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the capacity, recency and freshness properties of
//! the cache against a simple reference model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheStore, Lookup};

// == Test Configuration ==
const TEST_WINDOW: Duration = Duration::from_secs(10);

// == Strategies ==
/// Small key space so that sequences revisit keys often.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Populate { key: String, value: String },
    Lookup { key: String },
    /// Advance the clock by the given number of seconds
    Wait { secs: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Populate { key, value }),
        4 => key_strategy().prop_map(|key| CacheOp::Lookup { key }),
        1 => (0u64..15).prop_map(|secs| CacheOp::Wait { secs }),
    ]
}

// == Reference Model ==
/// Linear-scan LRU used only to cross-check `CacheStore`.
struct Model {
    capacity: usize,
    /// Front = least recently used
    order: Vec<String>,
    values: HashMap<String, (String, Instant)>,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: Vec::new(),
            values: HashMap::new(),
        }
    }

    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.push(key.to_string());
    }

    fn populate(&mut self, key: &str, value: &str, now: Instant) {
        if !self.values.contains_key(key) && self.values.len() >= self.capacity {
            let oldest = self.order.remove(0);
            self.values.remove(&oldest);
        }
        self.values.insert(key.to_string(), (value.to_string(), now));
        self.touch(key);
    }

    fn lookup(&mut self, key: &str, now: Instant) -> Lookup {
        match self.values.get(key) {
            Some((value, at)) if now.saturating_duration_since(*at) < TEST_WINDOW => {
                let value = value.clone();
                self.touch(key);
                Lookup::Hit(value)
            }
            Some(_) => Lookup::Stale,
            None => Lookup::Miss,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // For any sequence of populates with distinct keys, the entry count never
    // exceeds capacity and the oldest keys are the ones evicted.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..10,
        count in 1usize..40,
    ) {
        let mut store = CacheStore::new(capacity, TEST_WINDOW).unwrap();
        let now = Instant::now();

        for i in 0..count {
            store.populate(format!("key{}", i), format!("value{}", i), now);
            prop_assert!(store.len() <= capacity);
        }

        let survivors_from = count.saturating_sub(capacity);
        for i in 0..count {
            prop_assert_eq!(store.contains(&format!("key{}", i)), i >= survivors_from);
        }
    }

    // Populate(k, v1), Populate(k, v2), Lookup(k) returns v2 and the size is
    // unchanged by the second populate.
    #[test]
    fn prop_idempotent_replace(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy(),
    ) {
        let mut store = CacheStore::new(3, TEST_WINDOW).unwrap();
        let now = Instant::now();

        store.populate(key.clone(), value1, now);
        let size = store.len();
        store.populate(key.clone(), value2.clone(), now);

        prop_assert_eq!(store.len(), size);
        prop_assert_eq!(store.lookup(&key, now), Lookup::Hit(value2));
    }

    // A populate is visible within the window and stale once it has elapsed.
    #[test]
    fn prop_freshness_law(
        key in key_strategy(),
        value in value_strategy(),
        elapsed_ms in 0u64..20_000,
    ) {
        let mut store = CacheStore::new(4, TEST_WINDOW).unwrap();
        let start = Instant::now();

        store.populate(key.clone(), value.clone(), start);
        let result = store.lookup(&key, start + Duration::from_millis(elapsed_ms));

        if Duration::from_millis(elapsed_ms) < TEST_WINDOW {
            prop_assert_eq!(result, Lookup::Hit(value));
        } else {
            prop_assert_eq!(result, Lookup::Stale);
        }
    }

    // Arbitrary interleavings of populate, lookup and clock movement agree
    // with the reference model on every lookup and on the final contents.
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80),
    ) {
        let mut store = CacheStore::new(capacity, TEST_WINDOW).unwrap();
        let mut model = Model::new(capacity);
        let mut now = Instant::now();

        for op in ops {
            match op {
                CacheOp::Populate { key, value } => {
                    store.populate(key.clone(), value.clone(), now);
                    model.populate(&key, &value, now);
                }
                CacheOp::Lookup { key } => {
                    prop_assert_eq!(store.lookup(&key, now), model.lookup(&key, now));
                }
                CacheOp::Wait { secs } => {
                    now += Duration::from_secs(secs);
                }
            }
            prop_assert!(store.len() <= capacity);
        }

        let mut expected = model.order.clone();
        expected.reverse();
        prop_assert_eq!(store.keys_by_recency(), expected);
    }

    // Hit, miss and stale counters agree with the observed lookup results.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(3, TEST_WINDOW).unwrap();
        let mut now = Instant::now();
        let (mut hits, mut misses, mut stale) = (0u64, 0u64, 0u64);

        for op in ops {
            match op {
                CacheOp::Populate { key, value } => {
                    store.populate(key, value, now);
                }
                CacheOp::Lookup { key } => match store.lookup(&key, now) {
                    Lookup::Hit(_) => hits += 1,
                    Lookup::Stale => {
                        stale += 1;
                        misses += 1;
                    }
                    Lookup::Miss => misses += 1,
                },
                CacheOp::Wait { secs } => now += Duration::from_secs(secs),
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.stale, stale);
        prop_assert_eq!(stats.total_entries, store.len());
    }
}
