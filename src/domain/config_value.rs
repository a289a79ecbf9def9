// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! This module provides the `ConfigValue` type, a closed tagged union over the
//! value shapes a configuration entry can carry. The variant is chosen at the
//! point of ingestion (a YAML integer becomes `Int`, an environment variable
//! becomes `Str`) so no runtime type inference happens downstream.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A configuration value.
///
/// `ConfigValue` is a closed union: every value stored in a configuration
/// store is exactly one of these variants, fixed when the value is ingested.
/// Conversion methods coerce where it is lossless (`Str` parses to numbers
/// and booleans, `Int` widens to float) and fail with a kind mismatch
/// otherwise.
///
/// `Null` is a legitimate stored value, distinct from an absent key.
///
/// # Examples
///
/// ```
/// use layercfg::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from("42");
/// assert_eq!(value.as_i64("test.key").unwrap(), 42);
///
/// let value = ConfigValue::from(42i64);
/// assert_eq!(value.as_i64("test.key").unwrap(), 42);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// An explicit null value.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A signed integer value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    Str(String),
    /// An ordered list of values.
    List(Vec<ConfigValue>),
    /// A string-keyed map of values.
    Map(BTreeMap<String, ConfigValue>),
}

/// The kind tag of a [`ConfigValue`], mirroring its variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// The `Null` variant.
    Null,
    /// The `Bool` variant.
    Bool,
    /// The `Int` variant.
    Int,
    /// The `Float` variant.
    Float,
    /// The `Str` variant.
    Str,
    /// The `List` variant.
    List,
    /// The `Map` variant.
    Map,
}

impl ValueKind {
    /// Returns the lowercase name of this kind, as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl ConfigValue {
    /// Returns the kind tag of this value.
    ///
    /// The tag is always consistent with the stored variant; there is no
    /// separate inference step.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::config_value::{ConfigValue, ValueKind};
    ///
    /// assert_eq!(ConfigValue::from(true).kind(), ValueKind::Bool);
    /// assert_eq!(ConfigValue::Null.kind(), ValueKind::Null);
    /// ```
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::Null => ValueKind::Null,
            ConfigValue::Bool(_) => ValueKind::Bool,
            ConfigValue::Int(_) => ValueKind::Int,
            ConfigValue::Float(_) => ValueKind::Float,
            ConfigValue::Str(_) => ValueKind::Str,
            ConfigValue::List(_) => ValueKind::List,
            ConfigValue::Map(_) => ValueKind::Map,
        }
    }

    /// Returns `true` if this value is the `Null` variant.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the value as a string slice, if it is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Converts the value to a boolean.
    ///
    /// `Bool` values convert directly. `Str` values recognize the following
    /// (case-insensitive):
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::from("yes");
    /// assert_eq!(value.as_bool("test.key").unwrap(), true);
    ///
    /// let value = ConfigValue::from(false);
    /// assert_eq!(value.as_bool("test.key").unwrap(), false);
    /// ```
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::Str(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(true),
                "false" | "no" | "0" | "off" => Ok(false),
                _ => s
                    .parse::<bool>()
                    .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e)),
            },
            other => Err(kind_mismatch(key, "boolean", other)),
        }
    }

    /// Converts the value to an `i64`.
    ///
    /// `Int` values convert directly; `Str` values are parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::from("42");
    /// assert_eq!(value.as_i64("test.key").unwrap(), 42);
    /// ```
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        match self {
            ConfigValue::Int(n) => Ok(*n),
            ConfigValue::Str(s) => s
                .parse::<i64>()
                .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
            other => Err(kind_mismatch(key, "integer", other)),
        }
    }

    /// Converts the value to an `f64`.
    ///
    /// `Float` values convert directly, `Int` values widen, and `Str` values
    /// are parsed.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match self {
            ConfigValue::Float(n) => Ok(*n),
            ConfigValue::Int(n) => Ok(*n as f64),
            ConfigValue::Str(s) => s
                .parse::<f64>()
                .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e)),
            other => Err(kind_mismatch(key, "float", other)),
        }
    }

    /// Returns the value as a list slice, if it is a `List`.
    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the value as a map reference, if it is a `Map`.
    pub fn as_map(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Parses the value into any type that implements `FromStr`.
    ///
    /// The value is rendered to its flat string form first, so scalar
    /// variants parse the way their display reads.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::config_value::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("test.key").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let rendered = match self {
            ConfigValue::Str(s) => s.clone(),
            other => other.to_string(),
        };
        rendered
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversionError {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }
}

fn kind_mismatch(key: &str, expected: &'static str, actual: &ConfigValue) -> ConfigError {
    ConfigError::ValueKindMismatch {
        key: key.to_string(),
        expected,
        actual: actual.kind().name(),
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Str(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Str(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Int(n as i64)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Int(n)
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Float(n)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::List(items)
    }
}

impl From<BTreeMap<String, ConfigValue>> for ConfigValue {
    fn from(map: BTreeMap<String, ConfigValue>) -> Self {
        ConfigValue::Map(map)
    }
}

impl fmt::Display for ConfigValue {
    /// Renders the flat string form used by
    /// [`ConfigStore::to_flat_map`](crate::store::ConfigStore::to_flat_map).
    ///
    /// `Null` renders empty, scalars render bare, and containers render in a
    /// bracketed single-line form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => Ok(()),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Int(n) => write!(f, "{}", n),
            ConfigValue::Float(n) => write!(f, "{}", n),
            ConfigValue::Str(s) => write!(f, "{}", s),
            ConfigValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ConfigValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
