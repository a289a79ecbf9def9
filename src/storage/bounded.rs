// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-capacity map with a pluggable eviction order.
//!
//! This module provides `BoundedMap`, an associative container that never
//! grows past its capacity. When an insert would exceed capacity, exactly one
//! entry is evicted: the oldest under the configured order. `Insertion` order
//! gives FIFO eviction; `Access` order gives LRU eviction.

use crate::domain::{ConfigError, Result};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// The order a [`BoundedMap`] uses to pick its eviction candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvictionOrder {
    /// Entries age by insertion time; eviction is FIFO.
    Insertion,
    /// Entries age by last access; eviction is LRU. Under this order a
    /// successful read is a structural mutation: it refreshes the entry's
    /// recency, which is why [`BoundedMap::get`] takes `&mut self`.
    Access,
}

/// A fixed-capacity associative container with FIFO or LRU eviction.
///
/// The capacity is fixed at construction and must be greater than zero; there
/// is no resize operation. After any insert, `len() <= capacity()` holds, and
/// the eviction candidate is always the oldest entry under the configured
/// order. Updating an existing key replaces its value (and refreshes recency
/// under `Access` order) but never evicts.
///
/// # Examples
///
/// ```
/// use layercfg::storage::bounded::{BoundedMap, EvictionOrder};
///
/// let mut map = BoundedMap::new(2).unwrap();
/// map.insert("x", 1);
/// map.insert("y", 2);
/// let evicted = map.insert("z", 3);
/// assert_eq!(evicted, Some(("x", 1)));
/// ```
#[derive(Debug)]
pub struct BoundedMap<K, V> {
    entries: HashMap<K, V>,
    age: VecDeque<K>,
    capacity: usize,
    eviction: EvictionOrder,
}

impl<K, V> BoundedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a map with insertion-order (FIFO) eviction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_eviction(capacity, EvictionOrder::Insertion)
    }

    /// Creates a map with the given eviction order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_eviction(capacity: usize, eviction: EvictionOrder) -> Result<Self> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity { capacity });
        }
        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            age: VecDeque::with_capacity(capacity),
            capacity,
            eviction,
        })
    }

    /// Returns the fixed capacity of this map.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the configured eviction order.
    pub fn eviction(&self) -> EvictionOrder {
        self.eviction
    }

    /// Returns the number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the map contains the given key.
    ///
    /// Does not count as an access: recency is unchanged under either order.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or updates an entry, returning the evicted entry if the
    /// insert pushed the map past capacity.
    ///
    /// Updating an existing key replaces the value in place (refreshing
    /// recency under `Access` order) and never evicts. The eviction itself is
    /// silent beyond the returned entry: the removed key simply disappears
    /// from subsequent reads.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            if self.eviction == EvictionOrder::Access {
                touch(&mut self.age, &key);
            }
            return None;
        }

        let evicted = if self.entries.len() == self.capacity {
            self.age
                .pop_front()
                .and_then(|oldest| self.entries.remove(&oldest).map(|v| (oldest, v)))
        } else {
            None
        };

        self.entries.insert(key.clone(), value);
        self.age.push_back(key);
        evicted
    }

    /// Returns a reference to the value for `key`, refreshing its recency
    /// under `Access` order.
    ///
    /// Takes `&mut self` because an access-order read reorders the age list.
    /// Use [`peek`](Self::peek) for a read that is guaranteed not to mutate.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.eviction == EvictionOrder::Access && self.entries.contains_key(key) {
            touch(&mut self.age, key);
        }
        self.entries.get(key)
    }

    /// Returns a reference to the value for `key` without refreshing recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Removes an entry, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.age.retain(|k| k != key);
        }
        removed
    }

    /// Returns an iterator over the stored keys, oldest first under the
    /// configured order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.age.iter()
    }
}

/// Moves `key` to the most-recently-used end of the age list.
fn touch<K: Eq>(age: &mut VecDeque<K>, key: &K) {
    if let Some(pos) = age.iter().position(|k| k == key) {
        if let Some(k) = age.remove(pos) {
            age.push_back(k);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;

    #[test]
    fn test_zero_capacity_rejected() {
        let result = BoundedMap::<String, i32>::new(0);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidCapacity { capacity: 0 }
        ));
    }

    #[test]
    fn test_basic_insert_and_get() {
        let mut map = BoundedMap::new(3).unwrap();
        map.insert("a", 1);
        map.insert("b", 2);

        assert_eq!(map.get(&"a"), Some(&1));
        assert_eq!(map.peek(&"b"), Some(&2));
        assert_eq!(map.len(), 2);
        assert!(map.contains_key(&"a"));
        assert!(!map.contains_key(&"c"));
    }

    #[test]
    fn test_fifo_eviction() {
        // capacity 2, insert x, y, z in order -> x evicted, {y, z} remain
        let mut map = BoundedMap::new(2).unwrap();
        map.insert("x", 1);
        map.insert("y", 2);
        let evicted = map.insert("z", 3);

        assert_eq!(evicted, Some(("x", 1)));
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key(&"x"));
        assert!(map.contains_key(&"y"));
        assert!(map.contains_key(&"z"));
    }

    #[test]
    fn test_lru_eviction_respects_access() {
        // capacity 2, insert x, y; access x; insert z -> y evicted, {x, z}
        let mut map = BoundedMap::with_eviction(2, EvictionOrder::Access).unwrap();
        map.insert("x", 1);
        map.insert("y", 2);
        assert_eq!(map.get(&"x"), Some(&1));
        let evicted = map.insert("z", 3);

        assert_eq!(evicted, Some(("y", 2)));
        assert!(map.contains_key(&"x"));
        assert!(map.contains_key(&"z"));
    }

    #[test]
    fn test_fifo_ignores_access() {
        // Under insertion order a read must not change the eviction candidate.
        let mut map = BoundedMap::new(2).unwrap();
        map.insert("x", 1);
        map.insert("y", 2);
        assert_eq!(map.get(&"x"), Some(&1));
        let evicted = map.insert("z", 3);

        assert_eq!(evicted, Some(("x", 1)));
    }

    #[test]
    fn test_update_never_evicts() {
        let mut map = BoundedMap::new(2).unwrap();
        map.insert("a", 1);
        map.insert("b", 2);
        let evicted = map.insert("a", 10);

        assert_eq!(evicted, None);
        assert_eq!(map.len(), 2);
        assert_eq!(map.peek(&"a"), Some(&10));
        assert_eq!(map.peek(&"b"), Some(&2));
    }

    #[test]
    fn test_update_refreshes_recency_under_access_order() {
        let mut map = BoundedMap::with_eviction(2, EvictionOrder::Access).unwrap();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 10);
        let evicted = map.insert("c", 3);

        // "b" is now the least recently used
        assert_eq!(evicted, Some(("b", 2)));
        assert!(map.contains_key(&"a"));
        assert!(map.contains_key(&"c"));
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut map = BoundedMap::new(3).unwrap();
        for i in 0..10 {
            map.insert(i, i * 2);
            assert!(map.len() <= 3);
        }
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_contains_is_not_an_access() {
        let mut map = BoundedMap::with_eviction(2, EvictionOrder::Access).unwrap();
        map.insert("x", 1);
        map.insert("y", 2);
        assert!(map.contains_key(&"x"));
        let evicted = map.insert("z", 3);

        // contains_key did not refresh "x", so it is still the oldest
        assert_eq!(evicted, Some(("x", 1)));
    }

    #[test]
    fn test_remove() {
        let mut map = BoundedMap::new(3).unwrap();
        map.insert("a", 1);
        map.insert("b", 2);

        assert_eq!(map.remove(&"a"), Some(1));
        assert_eq!(map.remove(&"a"), None);
        assert_eq!(map.len(), 1);

        // the removed key no longer occupies an age slot
        map.insert("c", 3);
        map.insert("d", 4);
        let evicted = map.insert("e", 5);
        assert_eq!(evicted, Some(("b", 2)));
    }

    #[test]
    fn test_keys_oldest_first() {
        let mut map = BoundedMap::new(3).unwrap();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec![&"a", &"b", &"c"]);
    }

    #[test]
    fn test_capacity_and_eviction_accessors() {
        let map = BoundedMap::<&str, i32>::with_eviction(5, EvictionOrder::Access).unwrap();
        assert_eq!(map.capacity(), 5);
        assert_eq!(map.eviction(), EvictionOrder::Access);
        assert!(map.is_empty());
    }
}
