// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thread-safe key/value keepers.
//!
//! This module provides the `Keeper` trait, the uniform
//! `contains_key / save / get / get_or_default` contract shared by every
//! container in this crate, plus its two implementations: the unbounded
//! `MapKeeper` and the capacity-bounded `BoundedKeeper`.
//!
//! Missing keys are never an error: reads return `None` or the supplied
//! default. Values are cloned out of the lock, so guards never escape a
//! method.

use crate::domain::Result;
use crate::storage::bounded::{BoundedMap, EvictionOrder};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The uniform contract of a thread-safe key/value container.
///
/// All operations are safe under concurrent access from multiple threads.
/// `save` returns the value previously stored under the key, if any.
pub trait Keeper<K, V> {
    /// Returns `true` if a value is stored under `key`.
    fn contains_key(&self, key: &K) -> bool;

    /// Stores `value` under `key`, returning the previous value if one was
    /// present.
    fn save(&self, key: K, value: V) -> Option<V>;

    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &K) -> Option<V>;

    /// Returns the value stored under `key`, or `default` if absent.
    fn get_or_default(&self, key: &K, default: V) -> V {
        self.get(key).unwrap_or(default)
    }
}

/// The outcome of a conditional save on a [`MapKeeper`].
///
/// Distinguishes the three cases a guarded write can land in, so callers
/// never have to re-read the container to learn what happened.
#[derive(Clone, Debug, PartialEq)]
pub enum SaveOutcome<V> {
    /// No value was present; the new value was stored.
    Inserted,
    /// A value was present, the guard admitted the write, and the previous
    /// value was replaced. Carries the replaced value.
    Replaced(V),
    /// A value was present and the guard rejected the write. Carries the
    /// existing value, which is unchanged.
    Rejected(V),
}

/// An unbounded thread-safe keeper backed by a `HashMap` behind a
/// read/write lock.
///
/// # Examples
///
/// ```
/// use layercfg::storage::keeper::{Keeper, MapKeeper};
///
/// let keeper = MapKeeper::new();
/// assert_eq!(keeper.save("key", 1), None);
/// assert_eq!(keeper.save("key", 2), Some(1));
/// assert_eq!(keeper.get(&"key"), Some(2));
/// assert_eq!(keeper.get_or_default(&"other", 9), 9);
/// ```
#[derive(Debug)]
pub struct MapKeeper<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> MapKeeper<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates an empty keeper.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the keeper holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns a snapshot of the stored values.
    pub fn values(&self) -> Vec<V> {
        self.read().values().cloned().collect()
    }

    /// Stores `value` under `key` only if no value is present or the `admit`
    /// guard approves replacing the existing one.
    ///
    /// The presence check, the guard call, and the write happen under one
    /// exclusive lock acquisition, so concurrent conditional saves on the
    /// same key cannot interleave their check with their write.
    pub fn save_if(&self, key: K, value: V, admit: impl FnOnce(&V) -> bool) -> SaveOutcome<V> {
        let mut map = self.write();
        match map.get(&key) {
            None => {
                map.insert(key, value);
                SaveOutcome::Inserted
            }
            Some(existing) => {
                if admit(existing) {
                    let previous = map.insert(key, value);
                    match previous {
                        Some(previous) => SaveOutcome::Replaced(previous),
                        // get just observed a value under this key
                        None => SaveOutcome::Inserted,
                    }
                } else {
                    SaveOutcome::Rejected(existing.clone())
                }
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, V>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, V>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<K, V> MapKeeper<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Returns a snapshot of the stored keys.
    pub fn keys(&self) -> Vec<K> {
        self.read().keys().cloned().collect()
    }
}

impl<K, V> Default for MapKeeper<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Keeper<K, V> for MapKeeper<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn contains_key(&self, key: &K) -> bool {
        self.read().contains_key(key)
    }

    fn save(&self, key: K, value: V) -> Option<V> {
        self.write().insert(key, value)
    }

    fn get(&self, key: &K) -> Option<V> {
        self.read().get(key).cloned()
    }
}

/// A capacity-bounded thread-safe keeper backed by a [`BoundedMap`] behind a
/// read/write lock.
///
/// `contains_key` always takes the shared lock. `get` takes the shared lock
/// under insertion order, but the exclusive lock under access order, because
/// an access-order read refreshes recency and is therefore a structural
/// mutation that must be serialized against other readers and writers.
///
/// # Examples
///
/// ```
/// use layercfg::storage::keeper::{BoundedKeeper, Keeper};
/// use layercfg::storage::bounded::EvictionOrder;
///
/// let keeper = BoundedKeeper::with_eviction(2, EvictionOrder::Access).unwrap();
/// keeper.save("x", 1);
/// keeper.save("y", 2);
/// keeper.get(&"x");
/// keeper.save("z", 3); // evicts "y"
/// assert!(!keeper.contains_key(&"y"));
/// ```
#[derive(Debug)]
pub struct BoundedKeeper<K, V> {
    inner: RwLock<BoundedMap<K, V>>,
    eviction: EvictionOrder,
}

impl<K, V> BoundedKeeper<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a bounded keeper with insertion-order (FIFO) eviction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`](crate::domain::ConfigError::InvalidCapacity)
    /// if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_eviction(capacity, EvictionOrder::Insertion)
    }

    /// Creates a bounded keeper with the given eviction order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`](crate::domain::ConfigError::InvalidCapacity)
    /// if `capacity` is zero.
    pub fn with_eviction(capacity: usize, eviction: EvictionOrder) -> Result<Self> {
        Ok(Self {
            inner: RwLock::new(BoundedMap::with_eviction(capacity, eviction)?),
            eviction,
        })
    }

    /// Returns the fixed capacity of the backing map.
    pub fn capacity(&self) -> usize {
        self.read().capacity()
    }

    /// Returns the configured eviction order.
    pub fn eviction(&self) -> EvictionOrder {
        self.eviction
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the keeper holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, BoundedMap<K, V>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BoundedMap<K, V>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<K, V> Keeper<K, V> for BoundedKeeper<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn contains_key(&self, key: &K) -> bool {
        self.read().contains_key(key)
    }

    /// Stores `value` under `key`, returning the previous value for that key.
    ///
    /// Any eviction the insert triggers is silent: the evicted entry belongs
    /// to a different key and simply disappears from subsequent reads.
    fn save(&self, key: K, value: V) -> Option<V> {
        let mut map = self.write();
        let previous = map.peek(&key).cloned();
        map.insert(key, value);
        previous
    }

    fn get(&self, key: &K) -> Option<V> {
        match self.eviction {
            EvictionOrder::Access => self.write().get(key).cloned(),
            EvictionOrder::Insertion => self.read().peek(key).cloned(),
        }
    }
}
