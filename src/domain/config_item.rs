// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single prioritized configuration entry.
//!
//! This module provides the `ConfigItem` type: a key, a typed value, and the
//! priority order the value was written at. Items are immutable once
//! constructed; an overwrite in the store replaces the whole item.

use crate::domain::{ConfigKey, ConfigValue, ValueKind};
use serde::{Deserialize, Serialize};

/// A single configuration entry with a priority order.
///
/// The `order` is the priority attached to the write that produced this item:
/// lower order wins on conflict. The order is caller-supplied and not
/// validated against a range.
///
/// # Examples
///
/// ```
/// use layercfg::domain::config_item::ConfigItem;
/// use layercfg::domain::config_value::ValueKind;
///
/// let item = ConfigItem::new("database.port", 5432i64, 100);
/// assert_eq!(item.key().as_str(), "database.port");
/// assert_eq!(item.order(), 100);
/// assert_eq!(item.kind(), ValueKind::Int);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    key: ConfigKey,
    value: ConfigValue,
    order: i32,
}

impl ConfigItem {
    /// Creates a new configuration item.
    pub fn new(key: impl Into<ConfigKey>, value: impl Into<ConfigValue>, order: i32) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            order,
        }
    }

    /// Returns the key this item is stored under.
    pub fn key(&self) -> &ConfigKey {
        &self.key
    }

    /// Returns the value carried by this item.
    pub fn value(&self) -> &ConfigValue {
        &self.value
    }

    /// Returns the priority order this item was written at. Lower wins.
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Returns the kind tag of the carried value.
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    /// Consumes the item, returning its value.
    pub fn into_value(self) -> ConfigValue {
        self.value
    }

    /// Consumes the item, returning its parts.
    pub fn into_parts(self) -> (ConfigKey, ConfigValue, i32) {
        (self.key, self.value, self.order)
    }
}
