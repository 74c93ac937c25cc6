// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// A borrowed form of a cache key.
///
/// Lookups compare against stored keys without building an owned key; one is
/// only created when an entry has to be inserted.
pub(crate) trait LookupKey<K> {
    fn matches(&self, key: &K) -> bool;
    fn into_key(self) -> K;
}

struct Slot<K, V> {
    last_used: u64,
    key: K,
    value: V,
}

/// A small least-recently-used cache.
///
/// Lookups are a linear scan, so capacity should stay in the tens.
pub(crate) struct LruCache<K, V> {
    slots: Vec<Slot<K, V>>,
    clock: u64,
    capacity: usize,
}

impl<K, V> LruCache<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            clock: 0,
            capacity: capacity.max(1),
        }
    }

    /// Returns the value stored for `key`, creating it with `make` on a miss.
    ///
    /// A miss evicts the least recently used entry once the cache is full.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: impl LookupKey<K>,
        make: impl FnOnce() -> V,
    ) -> &V {
        self.clock += 1;
        let clock = self.clock;
        let index = match self.slots.iter().position(|slot| key.matches(&slot.key)) {
            Some(index) => index,
            None if self.slots.len() < self.capacity => {
                self.slots.push(Slot {
                    last_used: clock,
                    key: key.into_key(),
                    value: make(),
                });
                self.slots.len() - 1
            }
            None => {
                let index = self
                    .slots
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, slot)| slot.last_used)
                    .map_or(0, |(index, _)| index);
                let slot = &mut self.slots[index];
                slot.key = key.into_key();
                slot.value = make();
                index
            }
        };
        let slot = &mut self.slots[index];
        slot.last_used = clock;
        &slot.value
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots.len()
    }
}
