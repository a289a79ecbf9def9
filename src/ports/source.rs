// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, the port implemented by
//! every configuration source (environment variables, files, command-line
//! arguments). A source is read in bulk: the store ingests everything the
//! source provides at the source's priority order and resolves conflicts by
//! that order.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// Priority order for command-line argument sources (highest priority).
pub const CLI_ORDER: i32 = 0;

/// Priority order for environment variable sources.
pub const ENV_ORDER: i32 = 100;

/// Priority order for configuration file sources (lowest priority).
pub const FILE_ORDER: i32 = 200;

/// A trait for configuration sources.
///
/// Implementations must be `Send + Sync` to allow use in multi-threaded
/// contexts.
///
/// # Order
///
/// Each source carries a priority order. **Lower order wins**: when two
/// sources provide a value for the same key, the value from the source with
/// the lower order survives a merge. The conventional tiers are:
///
/// - [`CLI_ORDER`] (0): command-line arguments
/// - [`ENV_ORDER`] (100): environment variables
/// - [`FILE_ORDER`] (200): configuration files
///
/// # Examples
///
/// ```rust
/// use layercfg::ports::ConfigSource;
/// use layercfg::domain::{ConfigKey, ConfigValue, Result};
///
/// struct MySource;
///
/// impl ConfigSource for MySource {
///     fn name(&self) -> &str {
///         "my-source"
///     }
///
///     fn order(&self) -> i32 {
///         150
///     }
///
///     fn load(&self) -> Result<Vec<(ConfigKey, ConfigValue)>> {
///         Ok(vec![(ConfigKey::from("app.name"), ConfigValue::from("demo"))])
///     }
/// }
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this configuration source.
    ///
    /// Used for logging and error messages; a short identifier like "env",
    /// "yaml-file", or "cli".
    fn name(&self) -> &str;

    /// Returns the priority order of this source. Lower order wins.
    fn order(&self) -> i32;

    /// Reads every key/value pair this source provides.
    ///
    /// Values are typed at this point: a source that knows its values are
    /// integers or booleans returns them as such, and a plain-text source
    /// returns strings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceError`](crate::domain::ConfigError::SourceError)
    /// or a parse/IO error when the underlying data cannot be read.
    fn load(&self) -> Result<Vec<(ConfigKey, ConfigValue)>>;
}
