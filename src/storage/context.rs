// SPDX-License-Identifier: MIT OR Apache-2.0

//! Untyped sibling of the keeper: a heterogeneous container.
//!
//! This module provides `AnyContext`, which stores values of arbitrary types
//! under keys of a single type. Values are held as `Arc<dyn Any + Send +
//! Sync>` and retrieved through runtime downcasts, so one container can hold
//! helpers, caches, and settings of unrelated types.

use std::any::Any;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A shared value as stored by an [`AnyContext`].
pub type AnyValue = Arc<dyn Any + Send + Sync>;

/// A thread-safe heterogeneous key/value container.
///
/// `AnyContext` follows the same `contains_key / save / get / get_or_default`
/// contract as the typed keepers, with values erased to `Any`. Reads return
/// `None` both for absent keys and for present values of a different type;
/// callers that need to distinguish the two use [`get_raw`](Self::get_raw)
/// and downcast themselves.
///
/// # Examples
///
/// ```
/// use layercfg::storage::context::AnyContext;
///
/// let context = AnyContext::new();
/// context.save("count".to_string(), 42i64);
/// context.save("name".to_string(), "layered".to_string());
///
/// assert_eq!(*context.get::<i64>(&"count".to_string()).unwrap(), 42);
/// assert!(context.get::<bool>(&"count".to_string()).is_none());
/// ```
pub struct AnyContext<K> {
    inner: RwLock<HashMap<K, AnyValue>>,
}

impl<K> AnyContext<K>
where
    K: Eq + Hash,
{
    /// Creates an empty context.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.read().contains_key(key)
    }

    /// Stores `value` under `key`, returning the previous erased value if
    /// one was present.
    pub fn save<T: Any + Send + Sync>(&self, key: K, value: T) -> Option<AnyValue> {
        self.save_raw(key, Arc::new(value))
    }

    /// Stores an already-erased value under `key`.
    pub fn save_raw(&self, key: K, value: AnyValue) -> Option<AnyValue> {
        self.write().insert(key, value)
    }

    /// Returns the value stored under `key`, downcast to `T`.
    ///
    /// Returns `None` if the key is absent or the stored value is not a `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &K) -> Option<Arc<T>> {
        self.get_raw(key).and_then(|value| value.downcast::<T>().ok())
    }

    /// Returns the erased value stored under `key`, if any.
    pub fn get_raw(&self, key: &K) -> Option<AnyValue> {
        self.read().get(key).cloned()
    }

    /// Returns the value stored under `key` downcast to `T`, or `default`
    /// if absent or of a different type.
    pub fn get_or_default<T: Any + Send + Sync>(&self, key: &K, default: Arc<T>) -> Arc<T> {
        self.get(key).unwrap_or(default)
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the context holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, AnyValue>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, AnyValue>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<K> Default for AnyContext<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> std::fmt::Debug for AnyContext<K>
where
    K: Eq + Hash + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyContext")
            .field("len", &self.len())
            .finish()
    }
}
