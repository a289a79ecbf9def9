// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.
//!
//! This module provides a source that reads configuration values from
//! environment variables.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigSource, ENV_ORDER};
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Configuration source for environment variables.
///
/// Reads the process environment in one pass. Supports optional prefix
/// filtering (only read variables starting with "APP_", stripped from the
/// key) and key transformation (lowercasing, underscores to dots). Values
/// ingest as strings; typed conversion happens at the point of use.
///
/// # Order
///
/// Environment variables load at [`ENV_ORDER`] (100): they lose to
/// command-line arguments and win over configuration files.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::EnvVarSource;
/// use layercfg::ports::ConfigSource;
///
/// // Read all environment variables
/// let source = EnvVarSource::new();
///
/// // Read only variables with a specific prefix
/// let source = EnvVarSource::with_prefix("APP_");
/// ```
#[derive(Debug)]
pub struct EnvVarSource {
    /// Optional prefix to filter environment variables
    prefix: Option<String>,
    /// Whether to convert keys to lowercase
    lowercase_keys: bool,
    /// Whether to replace underscores with dots
    replace_underscores: bool,
    /// Fixed values standing in for the process environment, for tests
    overrides: Option<HashMap<String, String>>,
}

impl EnvVarSource {
    /// Creates a source without prefix filtering.
    ///
    /// This will read all environment variables available to the process.
    pub fn new() -> Self {
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: true,
            overrides: None,
        }
    }

    /// Creates a source that only reads variables starting with `prefix`.
    ///
    /// The prefix is stripped from the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use layercfg::adapters::EnvVarSource;
    ///
    /// let source = EnvVarSource::with_prefix("MYAPP_");
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            lowercase_keys: false,
            replace_underscores: true,
            overrides: None,
        }
    }

    /// Sets whether to convert keys to lowercase.
    pub fn lowercase_keys(mut self, enabled: bool) -> Self {
        self.lowercase_keys = enabled;
        self
    }

    /// Sets whether to replace underscores with dots in keys.
    ///
    /// Enabled by default, mapping `DATABASE_HOST` to `DATABASE.HOST`.
    pub fn replace_underscores(mut self, enabled: bool) -> Self {
        self.replace_underscores = enabled;
        self
    }

    /// Creates a source with fixed values instead of the process
    /// environment.
    ///
    /// Intended for tests that want environment-shaped input without
    /// touching the process environment.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: false,
            overrides: Some(values),
        }
    }

    fn transform(&self, key: String) -> Option<String> {
        let key = if let Some(prefix) = &self.prefix {
            key.strip_prefix(prefix)?.to_string()
        } else {
            key
        };

        let mut transformed = key;
        if self.lowercase_keys {
            transformed = transformed.to_lowercase();
        }
        if self.replace_underscores {
            transformed = transformed.replace('_', ".");
        }
        Some(transformed)
    }
}

impl Default for EnvVarSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvVarSource {
    fn name(&self) -> &str {
        "env"
    }

    fn order(&self) -> i32 {
        ENV_ORDER
    }

    fn load(&self) -> Result<Vec<(ConfigKey, ConfigValue)>> {
        let raw: Vec<(String, String)> = match &self.overrides {
            Some(values) => values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => env::vars().collect(),
        };

        let mut pairs = Vec::new();
        for (key, value) in raw {
            // Validate input sizes to prevent DoS
            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={}",
                    key.len(),
                    value.len()
                );
                continue;
            }

            if let Some(key) = self.transform(key) {
                pairs.push((ConfigKey::from(key), ConfigValue::from(value)));
            }
        }

        tracing::debug!(
            "Loaded {} environment variables (prefix={:?}, lowercase={}, replace_underscores={})",
            pairs.len(),
            self.prefix,
            self.lowercase_keys,
            self.replace_underscores
        );

        Ok(pairs)
    }
}
