// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait for turning the text content
//! of a configuration file into typed key/value pairs.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// A trait for configuration file parsers.
///
/// A parser converts file content into typed key/value pairs, flattening
/// nested structures into dotted keys. Each parser declares the file
/// extensions it handles.
///
/// # Examples
///
/// ```rust
/// use layercfg::ports::ConfigParser;
/// use layercfg::domain::{ConfigKey, ConfigValue, Result};
///
/// struct KeyValueParser;
///
/// impl ConfigParser for KeyValueParser {
///     fn parse(&self, content: &str) -> Result<Vec<(ConfigKey, ConfigValue)>> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (ConfigKey::from(k), ConfigValue::from(v)))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["properties"]
///     }
/// }
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into typed key/value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`](crate::domain::ConfigError::ParseError)
    /// when the content is not valid for this parser's format.
    fn parse(&self, content: &str) -> Result<Vec<(ConfigKey, ConfigValue)>>;

    /// Returns the file extensions this parser supports, without the dot.
    fn supported_extensions(&self) -> &[&str];
}
