// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument configuration source adapter.
//!
//! This module provides a source that reads configuration values from
//! command-line arguments.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigSource, CLI_ORDER};
use std::collections::HashMap;

/// Configuration source for command-line arguments.
///
/// Supports multiple argument formats:
/// - `--key=value`: Long form with equals sign
/// - `--key value`: Long form with space-separated value
/// - `-k value`: Short form with space-separated value
///
/// If the same key appears multiple times, the last occurrence wins. Values
/// ingest as strings; typed conversion happens at the point of use.
///
/// # Order
///
/// Command-line arguments load at [`CLI_ORDER`] (0), the highest-priority
/// tier: they win over environment variables and configuration files.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::CommandLineSource;
/// use layercfg::ports::ConfigSource;
///
/// let args = vec!["--database.host=localhost", "--port", "5432"];
/// let source = CommandLineSource::from_args(args);
/// ```
#[derive(Debug, Clone)]
pub struct CommandLineSource {
    /// Parsed configuration values
    values: HashMap<String, String>,
}

impl CommandLineSource {
    /// Creates a source with no arguments.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Creates a source from a vector of arguments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use layercfg::adapters::CommandLineSource;
    ///
    /// let args = vec!["--database.host=localhost", "--port", "5432"];
    /// let source = CommandLineSource::from_args(args);
    /// ```
    pub fn from_args<S: AsRef<str>>(args: Vec<S>) -> Self {
        let mut source = Self::new();
        source.parse_args(args);
        source
    }

    /// Creates a source from the process's command-line arguments.
    ///
    /// Skips the first argument (the program name) and parses the rest.
    pub fn from_env_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_args(args)
    }

    /// Parses command-line arguments and populates the values map.
    fn parse_args<S: AsRef<str>>(&mut self, args: Vec<S>) {
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_ref();

            // Handle --key=value format
            if arg.starts_with("--") && arg.contains('=') {
                if let Some((key, value)) = arg.strip_prefix("--").and_then(|s| s.split_once('='))
                {
                    self.values.insert(key.to_string(), value.to_string());
                }
                i += 1;
            }
            // Handle --key value and -k value formats
            else if let Some(key) = flag_key(arg) {
                if i + 1 < args.len() {
                    let next_arg = args[i + 1].as_ref();
                    // Make sure the next argument is not another flag
                    if !next_arg.starts_with('-') {
                        self.values.insert(key.to_string(), next_arg.to_string());
                        i += 2;
                    } else {
                        i += 1;
                    }
                } else {
                    i += 1;
                }
            } else {
                i += 1;
            }
        }
    }
}

/// Extracts the key of a value-expecting flag: `--key` or a single-character
/// `-k` short form.
fn flag_key(arg: &str) -> Option<&str> {
    if let Some(key) = arg.strip_prefix("--") {
        Some(key)
    } else if arg.starts_with('-') && arg.len() == 2 {
        arg.strip_prefix('-')
    } else {
        None
    }
}

impl Default for CommandLineSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for CommandLineSource {
    fn name(&self) -> &str {
        "cli"
    }

    fn order(&self) -> i32 {
        CLI_ORDER
    }

    fn load(&self) -> Result<Vec<(ConfigKey, ConfigValue)>> {
        Ok(self
            .values
            .iter()
            .map(|(k, v)| (ConfigKey::from(k.as_str()), ConfigValue::from(v.as_str())))
            .collect())
    }
}
