// SPDX-License-Identifier: MIT OR Apache-2.0

//! Priority-layered configuration store.
//!
//! This module provides `ConfigStore`, which keeps exactly one
//! [`ConfigItem`] per key and resolves conflicting writes by priority order:
//! **lower order wins**, and ties favor the newer value. Stores built from
//! individual sources are folded together with [`ConfigStore::merge`].

use crate::domain::{ConfigItem, ConfigKey, ConfigValue, Result};
use crate::ports::ConfigSource;
use crate::storage::{Keeper, MapKeeper, SaveOutcome};
use std::collections::{BTreeMap, BTreeSet};

/// The order used by [`ConfigStore::put`] when the caller does not supply
/// one. Sits at the environment tier of the conventional scale.
pub const DEFAULT_ORDER: i32 = 100;

/// The outcome of a priority-aware write to a [`ConfigStore`].
///
/// A plain nullable return cannot distinguish "my write replaced an item"
/// from "my write was blocked by a higher-priority item"; this variant makes
/// the three cases explicit.
#[derive(Clone, Debug, PartialEq)]
pub enum PutOutcome {
    /// No item existed for the key; the new item was stored.
    Inserted,
    /// An item existed at the same or a lower priority and was replaced.
    /// Carries the replaced item.
    Replaced(ConfigItem),
    /// An item existed at a strictly higher priority (lower order); the
    /// write was rejected. Carries the existing item, which is unchanged.
    Rejected(ConfigItem),
}

impl PutOutcome {
    /// Returns the replaced item, if this write replaced one.
    pub fn replaced(self) -> Option<ConfigItem> {
        match self {
            PutOutcome::Replaced(item) => Some(item),
            _ => None,
        }
    }

    /// Returns `true` if the write was stored (inserted or replaced).
    pub fn is_written(&self) -> bool {
        !matches!(self, PutOutcome::Rejected(_))
    }

    /// Returns the blocking item, if the write was rejected.
    pub fn rejected(&self) -> Option<&ConfigItem> {
        match self {
            PutOutcome::Rejected(item) => Some(item),
            _ => None,
        }
    }
}

/// A priority-layered key/value configuration store.
///
/// Exactly one [`ConfigItem`] exists per key at any time. A write replaces
/// the stored item iff no item exists for the key, or the existing item's
/// order is greater than or equal to the new order (the new write is
/// same-or-higher priority; ties favor the new value). A write at a strictly
/// lower priority is rejected and leaves the store unchanged.
///
/// All mutating operations are serialized: the priority comparison and the
/// replacement happen as one atomic step, so concurrent writes on the same
/// key cannot interleave their check with their write. Reads observe either
/// a fully-applied-earlier or fully-applied-later write, never a partial
/// one.
///
/// # Examples
///
/// ```
/// use layercfg::store::{ConfigStore, PutOutcome};
///
/// let store = ConfigStore::new();
/// store.put_with_order("a.b", "1", 100);
/// store.put_with_order("a.b", "2", 0);
///
/// let item = store.get_item_str("a.b").unwrap();
/// assert_eq!(item.value().as_str(), Some("2"));
/// ```
#[derive(Debug)]
pub struct ConfigStore {
    items: MapKeeper<ConfigKey, ConfigItem>,
    default_order: i32,
}

impl ConfigStore {
    /// Creates an empty store with [`DEFAULT_ORDER`] as its default order.
    pub fn new() -> Self {
        Self::with_default_order(DEFAULT_ORDER)
    }

    /// Creates an empty store whose [`put`](Self::put) writes at the given
    /// order.
    pub fn with_default_order(default_order: i32) -> Self {
        Self {
            items: MapKeeper::new(),
            default_order,
        }
    }

    /// Bulk-initializes a store from a configuration source.
    ///
    /// Every pair the source provides is written at the source's order,
    /// which also becomes the store's default order.
    ///
    /// # Errors
    ///
    /// Propagates the source's load error.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self> {
        let store = Self::with_default_order(source.order());
        let pairs = source.load()?;
        let count = pairs.len();
        for (key, value) in pairs {
            store.put(key, value);
        }
        tracing::debug!(
            "Loaded {} entries from source '{}' at order {}",
            count,
            source.name(),
            source.order()
        );
        Ok(store)
    }

    /// Returns the order used by [`put`](Self::put).
    pub fn default_order(&self) -> i32 {
        self.default_order
    }

    /// Writes a value at the store's default order.
    ///
    /// See [`put_with_order`](Self::put_with_order) for the priority rule.
    pub fn put(&self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) -> PutOutcome {
        self.put_with_order(key, value, self.default_order)
    }

    /// Writes a value at an explicit priority order.
    ///
    /// The item is replaced iff no item exists for the key, or the existing
    /// item's order is `>=` `order`. Otherwise the write is rejected and the
    /// existing item is returned unchanged inside
    /// [`PutOutcome::Rejected`].
    pub fn put_with_order(
        &self,
        key: impl Into<ConfigKey>,
        value: impl Into<ConfigValue>,
        order: i32,
    ) -> PutOutcome {
        let key = key.into();
        let item = ConfigItem::new(key.clone(), value, order);
        match self.items.save_if(key, item, |existing| existing.order() >= order) {
            SaveOutcome::Inserted => PutOutcome::Inserted,
            SaveOutcome::Replaced(previous) => PutOutcome::Replaced(previous),
            SaveOutcome::Rejected(existing) => {
                tracing::debug!(
                    "Write at order {} rejected for '{}': existing item holds order {}",
                    order,
                    existing.key(),
                    existing.order()
                );
                PutOutcome::Rejected(existing)
            }
        }
    }

    /// Returns the item stored under `key`, if any.
    pub fn get_item(&self, key: &ConfigKey) -> Option<ConfigItem> {
        self.items.get(key)
    }

    /// Returns the item stored under a string key, if any.
    pub fn get_item_str(&self, key: &str) -> Option<ConfigItem> {
        self.get_item(&ConfigKey::from(key))
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &ConfigKey) -> Option<ConfigValue> {
        self.get_item(key).map(ConfigItem::into_value)
    }

    /// Returns the value stored under a string key, if any.
    pub fn get_str(&self, key: &str) -> Option<ConfigValue> {
        self.get(&ConfigKey::from(key))
    }

    /// Returns `true` if an item is stored under `key`.
    pub fn contains_key(&self, key: &ConfigKey) -> bool {
        self.items.contains_key(key)
    }

    /// Returns the set of stored keys.
    pub fn keys(&self) -> BTreeSet<ConfigKey> {
        self.items.keys().into_iter().collect()
    }

    /// Returns a snapshot of the stored items.
    pub fn items(&self) -> Vec<ConfigItem> {
        self.items.values()
    }

    /// Returns the number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Folds every item of `other` into this store, resolving conflicts by
    /// the priority rule, and returns the items that got overwritten.
    ///
    /// Each of `other`'s items is written at its own order, so the result is
    /// independent of `other`'s iteration order as long as `other` holds one
    /// item per key (which it always does). Rejected writes are not
    /// reported; merging an empty store is a no-op.
    pub fn merge(&self, other: &ConfigStore) -> Vec<ConfigItem> {
        let mut replaced = Vec::new();
        for item in other.items() {
            let (key, value, order) = item.into_parts();
            if let PutOutcome::Replaced(previous) = self.put_with_order(key, value, order) {
                replaced.push(previous);
            }
        }
        tracing::debug!(
            "Merged {} items into store, {} replaced",
            other.len(),
            replaced.len()
        );
        replaced
    }

    /// Renders the store as a flat string map.
    ///
    /// Every non-null value is stringified through its flat display form;
    /// null-valued items are omitted.
    pub fn to_flat_map(&self) -> BTreeMap<String, String> {
        self.items()
            .into_iter()
            .filter(|item| !item.value().is_null())
            .map(|item| {
                let (key, value, _) = item.into_parts();
                (key.into_string(), value.to_string())
            })
            .collect()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that layers configuration sources into one effective store.
///
/// Each source is loaded into its own store at the source's order and merged
/// into the result, so the conventional tiers resolve as CLI over
/// environment over file.
///
/// # Examples
///
/// ```rust
/// use layercfg::store::ConfigStoreBuilder;
///
/// # fn main() -> layercfg::domain::Result<()> {
/// let store = ConfigStoreBuilder::new()
///     .with_env_vars()
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigStoreBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigStoreBuilder {
    /// Creates a new builder with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds a configuration source.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds environment variables as a source at the environment tier.
    #[cfg(feature = "env")]
    pub fn with_env_vars(self) -> Self {
        use crate::adapters::EnvVarSource;
        self.with_source(Box::new(EnvVarSource::new().lowercase_keys(true)))
    }

    /// Adds environment variables with a prefix as a source.
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        use crate::adapters::EnvVarSource;
        self.with_source(Box::new(
            EnvVarSource::with_prefix(prefix).lowercase_keys(true),
        ))
    }

    /// Adds command-line arguments as a source at the CLI tier.
    #[cfg(feature = "cli")]
    pub fn with_cli_args<S: AsRef<str>>(self, args: Vec<S>) -> Self {
        use crate::adapters::CommandLineSource;
        self.with_source(Box::new(CommandLineSource::from_args(args)))
    }

    /// Adds a YAML file as a source at the file tier.
    ///
    /// # Errors
    ///
    /// Propagates the file read or parse error.
    #[cfg(feature = "yaml")]
    pub fn with_yaml_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::YamlFileSource;
        let source = YamlFileSource::from_file(path)?;
        Ok(self.with_source(Box::new(source)))
    }

    /// Builds the effective store by loading and merging every source.
    ///
    /// # Errors
    ///
    /// Propagates the first source load error.
    pub fn build(self) -> Result<ConfigStore> {
        let merged = ConfigStore::new();
        for source in &self.sources {
            let store = ConfigStore::from_source(source.as_ref())?;
            merged.merge(&store);
        }
        Ok(merged)
    }
}

impl Default for ConfigStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValueKind;

    struct FixedSource {
        name: &'static str,
        order: i32,
        pairs: Vec<(&'static str, ConfigValue)>,
    }

    impl ConfigSource for FixedSource {
        fn name(&self) -> &str {
            self.name
        }

        fn order(&self) -> i32 {
            self.order
        }

        fn load(&self) -> Result<Vec<(ConfigKey, ConfigValue)>> {
            Ok(self
                .pairs
                .iter()
                .map(|(k, v)| (ConfigKey::from(*k), v.clone()))
                .collect())
        }
    }

    #[test]
    fn test_put_inserts_new_key() {
        let store = ConfigStore::new();
        let outcome = store.put("key", "value");
        assert_eq!(outcome, PutOutcome::Inserted);
        assert_eq!(store.get_str("key"), Some(ConfigValue::from("value")));
    }

    #[test]
    fn test_put_uses_default_order() {
        let store = ConfigStore::with_default_order(7);
        store.put("key", "value");
        assert_eq!(store.get_item_str("key").unwrap().order(), 7);
    }

    #[test]
    fn test_lower_order_wins() {
        let store = ConfigStore::new();
        store.put_with_order("k", "v1", 10);
        let outcome = store.put_with_order("k", "v2", 5);

        assert!(matches!(outcome, PutOutcome::Replaced(_)));
        let item = store.get_item_str("k").unwrap();
        assert_eq!(item.value().as_str(), Some("v2"));
        assert_eq!(item.order(), 5);
    }

    #[test]
    fn test_higher_order_rejected() {
        let store = ConfigStore::new();
        store.put_with_order("k", "v1", 5);
        let outcome = store.put_with_order("k", "v2", 10);

        // the rejected outcome carries v1's item unchanged
        let blocking = outcome.rejected().unwrap();
        assert_eq!(blocking.value().as_str(), Some("v1"));
        assert_eq!(blocking.order(), 5);

        let item = store.get_item_str("k").unwrap();
        assert_eq!(item.value().as_str(), Some("v1"));
    }

    #[test]
    fn test_tie_favors_new_value() {
        let store = ConfigStore::new();
        store.put_with_order("k", "v1", 5);
        let outcome = store.put_with_order("k", "v2", 5);

        assert!(matches!(outcome, PutOutcome::Replaced(_)));
        assert_eq!(
            store.get_item_str("k").unwrap().value().as_str(),
            Some("v2")
        );
    }

    #[test]
    fn test_replaced_carries_old_item() {
        let store = ConfigStore::new();
        store.put_with_order("k", "v1", 10);
        let replaced = store.put_with_order("k", "v2", 5).replaced().unwrap();
        assert_eq!(replaced.value().as_str(), Some("v1"));
        assert_eq!(replaced.order(), 10);
    }

    #[test]
    fn test_put_outcome_is_written() {
        let store = ConfigStore::new();
        assert!(store.put_with_order("k", "v1", 10).is_written());
        assert!(store.put_with_order("k", "v2", 5).is_written());
        assert!(!store.put_with_order("k", "v3", 50).is_written());
    }

    #[test]
    fn test_scenario_cli_beats_file() {
        let store = ConfigStore::new();
        store.put_with_order("a.b", "1", 100);
        store.put_with_order("a.b", "2", 0);
        assert_eq!(
            store.get_item_str("a.b").unwrap().value().as_str(),
            Some("2")
        );
    }

    #[test]
    fn test_one_item_per_key() {
        let store = ConfigStore::new();
        store.put_with_order("k", "v1", 10);
        store.put_with_order("k", "v2", 5);
        store.put_with_order("k", "v3", 50);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_keys_and_items() {
        let store = ConfigStore::new();
        store.put("b", "2");
        store.put("a", "1");

        let keys: Vec<String> = store.keys().into_iter().map(ConfigKey::into_string).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(store.items().len(), 2);
        assert!(store.contains_key(&ConfigKey::from("a")));
    }

    #[test]
    fn test_merge_collects_replaced() {
        let base = ConfigStore::new();
        base.put_with_order("a", "base-a", 100);
        base.put_with_order("b", "base-b", 100);

        let layer = ConfigStore::new();
        layer.put_with_order("a", "layer-a", 0);
        layer.put_with_order("c", "layer-c", 0);

        let replaced = base.merge(&layer);

        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].value().as_str(), Some("base-a"));
        assert_eq!(
            base.get_str("a"),
            Some(ConfigValue::from("layer-a"))
        );
        assert_eq!(base.get_str("c"), Some(ConfigValue::from("layer-c")));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn test_merge_rejections_not_reported() {
        let base = ConfigStore::new();
        base.put_with_order("a", "base-a", 0);

        let layer = ConfigStore::new();
        layer.put_with_order("a", "layer-a", 100);

        let replaced = base.merge(&layer);
        assert!(replaced.is_empty());
        assert_eq!(base.get_str("a"), Some(ConfigValue::from("base-a")));
    }

    #[test]
    fn test_merge_empty_store_is_noop() {
        let base = ConfigStore::new();
        base.put("a", "1");

        let replaced = base.merge(&ConfigStore::new());
        assert!(replaced.is_empty());
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_merge_matches_item_by_item_fold() {
        let a1 = ConfigStore::new();
        let a2 = ConfigStore::new();
        for store in [&a1, &a2] {
            store.put_with_order("x", "ax", 50);
            store.put_with_order("y", "ay", 10);
        }

        let b = ConfigStore::new();
        b.put_with_order("x", "bx", 10);
        b.put_with_order("y", "by", 50);
        b.put_with_order("z", "bz", 30);

        a1.merge(&b);
        for item in b.items() {
            let (key, value, order) = item.into_parts();
            a2.put_with_order(key, value, order);
        }

        for key in ["x", "y", "z"] {
            assert_eq!(a1.get_str(key), a2.get_str(key), "diverged on {}", key);
        }
    }

    #[test]
    fn test_to_flat_map_omits_null() {
        let store = ConfigStore::new();
        store.put("present", 42i64);
        store.put("absent", ConfigValue::Null);
        store.put("flag", true);

        let flat = store.to_flat_map();
        assert_eq!(flat.get("present"), Some(&"42".to_string()));
        assert_eq!(flat.get("flag"), Some(&"true".to_string()));
        assert!(!flat.contains_key("absent"));
    }

    #[test]
    fn test_null_value_is_stored_not_absent() {
        let store = ConfigStore::new();
        store.put("k", ConfigValue::Null);
        assert!(store.contains_key(&ConfigKey::from("k")));
        assert_eq!(store.get_item_str("k").unwrap().kind(), ValueKind::Null);
    }

    #[test]
    fn test_from_source() {
        let source = FixedSource {
            name: "fixed",
            order: 30,
            pairs: vec![("a", ConfigValue::from(1i64)), ("b", ConfigValue::from(true))],
        };

        let store = ConfigStore::from_source(&source).unwrap();
        assert_eq!(store.default_order(), 30);
        assert_eq!(store.get_item_str("a").unwrap().order(), 30);
        assert_eq!(store.get_str("b"), Some(ConfigValue::from(true)));
    }

    #[test]
    fn test_builder_layers_by_order() {
        let file = FixedSource {
            name: "file",
            order: 200,
            pairs: vec![
                ("shared", ConfigValue::from("file")),
                ("file.only", ConfigValue::from("f")),
            ],
        };
        let cli = FixedSource {
            name: "cli",
            order: 0,
            pairs: vec![("shared", ConfigValue::from("cli"))],
        };

        // Add in low-priority-last order to show the order value decides,
        // not the merge sequence.
        let store = ConfigStoreBuilder::new()
            .with_source(Box::new(cli))
            .with_source(Box::new(file))
            .build()
            .unwrap();

        assert_eq!(store.get_str("shared"), Some(ConfigValue::from("cli")));
        assert_eq!(store.get_str("file.only"), Some(ConfigValue::from("f")));
    }

    #[test]
    fn test_concurrent_puts_on_same_key() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(ConfigStore::new());
        let mut handles = Vec::new();

        for order in 0..16 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store.put_with_order("contended", format!("v{}", order), order);
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // the surviving item must be the one written at the lowest order
        let item = store.get_item_str("contended").unwrap();
        assert_eq!(item.order(), 0);
        assert_eq!(item.value().as_str(), Some("v0"));
    }
}
