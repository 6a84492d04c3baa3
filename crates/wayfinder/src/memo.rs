//! Single-slot memoization keyed on structural equality.
//!
//! Only the most recent call is remembered. A call whose input compares
//! equal (deeply, via `PartialEq`) to the stored input returns the stored
//! output without recomputing; anything else recomputes and replaces the
//! slot. Identity of the input is never consulted.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

/// Hit/miss counters for a [`LastCall`] slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

struct Slot<K, V> {
    entry: Option<(K, Arc<V>)>,
    stats: CacheStats,
}

/// Cache of the last `(input, output)` pair.
///
/// The compare, compute and store steps run under one lock, so the slot
/// always holds an output that was computed from its stored input.
pub struct LastCall<K, V> {
    name: &'static str,
    slot: Mutex<Slot<K, V>>,
}

impl<K, V> LastCall<K, V> {
    /// Create an empty slot. `name` labels log lines.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Mutex::new(Slot {
                entry: None,
                stats: CacheStats::default(),
            }),
        }
    }

    /// Return the cached output if `matches` accepts the stored input,
    /// otherwise compute, store and return a fresh output.
    ///
    /// `key` is only invoked on a miss, so callers can compare against a
    /// borrowed input and clone it only when it must be stored.
    pub fn get_or_compute(
        &self,
        matches: impl FnOnce(&K) -> bool,
        key: impl FnOnce() -> K,
        compute: impl FnOnce() -> V,
    ) -> Arc<V> {
        let mut guard = self.slot.lock();
        let slot = &mut *guard;

        if let Some((stored, output)) = &slot.entry
            && matches(stored)
        {
            let output = Arc::clone(output);
            slot.stats.hits += 1;
            debug!(cache = self.name, "memo hit");
            return output;
        }

        slot.stats.misses += 1;
        debug!(cache = self.name, "memo miss, recomputing");
        let output = Arc::new(compute());
        slot.entry = Some((key(), Arc::clone(&output)));
        output
    }

    pub fn stats(&self) -> CacheStats {
        self.slot.lock().stats
    }
}

impl<K, V> std::fmt::Debug for LastCall<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastCall")
            .field("name", &self.name)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cached(memo: &LastCall<Vec<u32>, u32>, input: &[u32]) -> Arc<u32> {
        memo.get_or_compute(
            |stored| stored.as_slice() == input,
            || input.to_vec(),
            || input.iter().sum(),
        )
    }

    #[test]
    fn equal_input_returns_same_output() {
        let memo = LastCall::new("test");
        let first = cached(&memo, &[1, 2, 3]);
        let second = memo.get_or_compute(
            |stored| stored.as_slice() == [1, 2, 3],
            || unreachable!(),
            || unreachable!(),
        );

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, 6);
        assert_eq!(memo.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn different_input_recomputes_and_replaces() {
        let memo = LastCall::new("test");
        let first = cached(&memo, &[1]);
        let second = cached(&memo, &[2]);
        assert!(!Arc::ptr_eq(&first, &second));

        // Only the last input is remembered.
        let third = cached(&memo, &[1]);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(memo.stats(), CacheStats { hits: 0, misses: 3 });
    }

    #[test]
    fn concurrent_callers_get_output_for_their_input() {
        let memo = LastCall::new("test");

        std::thread::scope(|scope| {
            for thread in 0..8u32 {
                let memo = &memo;
                scope.spawn(move || {
                    for round in 0..200u32 {
                        let input = [thread % 3, round % 2, 1];
                        let output = cached(memo, &input);
                        assert_eq!(*output, input.iter().sum::<u32>());
                    }
                });
            }
        });

        let stats = memo.stats();
        assert_eq!(stats.hits + stats.misses, 8 * 200);
    }
}
