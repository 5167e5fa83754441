//! Info set store and regret matching.
//!
//! The store maps information-state keys to the per-action accumulators CFR
//! needs: cumulative counterfactual regret and cumulative strategy weight.
//! It is exclusively owned by one solver, so plain `&mut` access suffices and
//! no locking discipline is needed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Accumulators for one information set.
///
/// `regret_sum` is signed and updated unclamped; clamping to zero happens
/// only at read time in `current_strategy`. `strategy_sum` is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoSetRecord {
    /// Cumulative counterfactual regret per action.
    pub regret_sum: Vec<f64>,
    /// Cumulative strategy weight per action.
    pub strategy_sum: Vec<f64>,
}

impl InfoSetRecord {
    fn new(num_actions: usize) -> Self {
        Self {
            regret_sum: vec![0.0; num_actions],
            strategy_sum: vec![0.0; num_actions],
        }
    }
}

/// Store of all information sets discovered during training.
#[derive(Debug, Clone, Default)]
pub struct InfoSetStore {
    records: FxHashMap<String, InfoSetRecord>,
}

impl InfoSetStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Look up a record, zero-initializing it on first access.
    pub fn get_or_create(&mut self, info_key: &str, num_actions: usize) -> &mut InfoSetRecord {
        let record = self
            .records
            .entry(info_key.to_string())
            .or_insert_with(|| InfoSetRecord::new(num_actions));
        assert_eq!(
            record.regret_sum.len(),
            num_actions,
            "action count mismatch for info set {}",
            info_key
        );
        record
    }

    /// Current strategy for an info set via regret matching.
    ///
    /// Each action's probability is its positive regret divided by the sum of
    /// positive regrets; if that sum is zero (the cold-start condition, not an
    /// error) the strategy is uniform. The returned probabilities are also
    /// added into the record's cumulative strategy weights; this per-visit
    /// accumulation is what makes the time average converge.
    pub fn current_strategy(&mut self, info_key: &str, num_actions: usize) -> Vec<f64> {
        let record = self.get_or_create(info_key, num_actions);

        let positive: Vec<f64> = record.regret_sum.iter().map(|&r| r.max(0.0)).collect();
        let sum: f64 = positive.iter().sum();

        let strategy: Vec<f64> = if sum > 0.0 {
            positive.iter().map(|&r| r / sum).collect()
        } else {
            vec![1.0 / num_actions as f64; num_actions]
        };

        for (acc, &p) in record.strategy_sum.iter_mut().zip(strategy.iter()) {
            *acc += p;
        }

        strategy
    }

    /// Long-run average strategy for an info set.
    ///
    /// Normalizes the cumulative strategy weights; an entirely zero
    /// accumulator (unvisited or untrained) resolves to uniform.
    pub fn average_strategy(&self, info_key: &str, num_actions: usize) -> Vec<f64> {
        match self.records.get(info_key) {
            Some(record) => {
                let total: f64 = record.strategy_sum.iter().sum();
                if total > 0.0 {
                    record.strategy_sum.iter().map(|&w| w / total).collect()
                } else {
                    vec![1.0 / num_actions as f64; num_actions]
                }
            }
            None => vec![1.0 / num_actions as f64; num_actions],
        }
    }

    /// Add `value` to the cumulative regret of one action, unclamped.
    pub fn update_regret(&mut self, info_key: &str, action_idx: usize, value: f64) {
        let record = self
            .records
            .get_mut(info_key)
            .unwrap_or_else(|| panic!("update_regret on unknown info set {}", info_key));
        record.regret_sum[action_idx] += value;
    }

    /// Number of information sets stored.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether an info set exists in the store.
    pub fn contains(&self, info_key: &str) -> bool {
        self.records.contains_key(info_key)
    }

    /// Read access to a record, if present.
    pub fn get(&self, info_key: &str) -> Option<&InfoSetRecord> {
        self.records.get(info_key)
    }

    /// All stored info set keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.records.keys()
    }

    /// Discard all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Export records to a serializable snapshot.
    pub fn export(&self) -> FxHashMap<String, InfoSetRecord> {
        self.records.clone()
    }

    /// Replace records from a snapshot.
    pub fn import(&mut self, records: FxHashMap<String, InfoSetRecord>) {
        self.records = records;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cold_start_is_uniform() {
        let mut store = InfoSetStore::new();
        let strategy = store.current_strategy("x", 3);
        assert_eq!(strategy, vec![1.0 / 3.0; 3]);
        // Average of an unvisited key is uniform too, never a division by zero
        assert_eq!(store.average_strategy("never-seen", 2), vec![0.5, 0.5]);
        assert_eq!(store.average_strategy("x", 3), vec![1.0 / 3.0; 3]);
    }

    #[test]
    fn test_regret_matching_proportional() {
        let mut store = InfoSetStore::new();
        store.get_or_create("k", 3);
        store.update_regret("k", 0, 3.0);
        store.update_regret("k", 1, 1.0);
        store.update_regret("k", 2, -5.0);

        let strategy = store.current_strategy("k", 3);
        assert!((strategy[0] - 0.75).abs() < 1e-12);
        assert!((strategy[1] - 0.25).abs() < 1e-12);
        assert_eq!(strategy[2], 0.0);
        let sum: f64 = strategy.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_regret_stored_unclamped() {
        let mut store = InfoSetStore::new();
        store.get_or_create("k", 2);
        store.update_regret("k", 0, -2.0);
        store.update_regret("k", 0, 1.0);
        assert_eq!(store.get("k").unwrap().regret_sum[0], -1.0);
        // Clamping happens only at read time
        let strategy = store.current_strategy("k", 2);
        assert_eq!(strategy, vec![0.5, 0.5]);
    }

    #[test]
    fn test_strategy_sum_accumulates_every_call() {
        let mut store = InfoSetStore::new();
        store.current_strategy("k", 2);
        store.current_strategy("k", 2);
        let record = store.get("k").unwrap();
        assert_eq!(record.strategy_sum, vec![1.0, 1.0]);

        let avg = store.average_strategy("k", 2);
        assert_eq!(avg, vec![0.5, 0.5]);
    }

    #[test]
    #[should_panic(expected = "action count mismatch")]
    fn test_action_count_mismatch_fails_fast() {
        let mut store = InfoSetStore::new();
        store.get_or_create("k", 2);
        store.get_or_create("k", 3);
    }
}
