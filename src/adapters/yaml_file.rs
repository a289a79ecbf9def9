// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file configuration source adapter.
//!
//! This module provides a source that reads configuration values from YAML
//! files. Nested mappings flatten to dotted keys; scalars and sequences
//! ingest as typed values.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigParser, ConfigSource, FILE_ORDER};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for YAML configuration files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// YAML parser implementation.
///
/// Converts YAML documents into typed key/value pairs. Nested mappings are
/// flattened using dot notation; scalar leaves keep their YAML type (bool,
/// integer, float, string, null) and sequences become list values.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::YamlParser;
/// use layercfg::ports::ConfigParser;
/// use layercfg::domain::ConfigValue;
///
/// let parser = YamlParser::new();
/// let pairs = parser.parse("database:\n  host: localhost\n  port: 5432").unwrap();
/// assert!(pairs.contains(&("database.port".into(), ConfigValue::Int(5432))));
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    /// Flattens a YAML document into typed pairs with dot notation keys.
    fn flatten(value: &serde_yaml::Value, prefix: &str, out: &mut Vec<(ConfigKey, ConfigValue)>) {
        match value {
            serde_yaml::Value::Mapping(map) => {
                for (key, val) in map {
                    if let Some(key_str) = key.as_str() {
                        let new_prefix = if prefix.is_empty() {
                            key_str.to_string()
                        } else {
                            format!("{}.{}", prefix, key_str)
                        };
                        Self::flatten(val, &new_prefix, out);
                    }
                }
            }
            other => {
                if !prefix.is_empty() {
                    out.push((ConfigKey::from(prefix), Self::convert(other)));
                }
            }
        }
    }

    /// Converts a YAML node into a typed configuration value.
    fn convert(value: &serde_yaml::Value) -> ConfigValue {
        match value {
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(*b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    ConfigValue::Float(f)
                } else {
                    // out of i64/f64 range; keep the textual form
                    ConfigValue::Str(n.to_string())
                }
            }
            serde_yaml::Value::String(s) => ConfigValue::Str(s.clone()),
            serde_yaml::Value::Sequence(seq) => {
                ConfigValue::List(seq.iter().map(Self::convert).collect())
            }
            serde_yaml::Value::Mapping(map) => {
                let mut converted = BTreeMap::new();
                for (key, val) in map {
                    if let Some(key_str) = key.as_str() {
                        converted.insert(key_str.to_string(), Self::convert(val));
                    }
                }
                ConfigValue::Map(converted)
            }
            serde_yaml::Value::Tagged(tagged) => Self::convert(&tagged.value),
        }
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<Vec<(ConfigKey, ConfigValue)>> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        let mut out = Vec::new();
        Self::flatten(&value, "", &mut out);
        Ok(out)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Configuration source for YAML files.
///
/// Reads and parses the file eagerly at construction. Supports automatic
/// discovery of configuration files in OS-appropriate locations as well as
/// custom file paths.
///
/// # Order
///
/// YAML files load at [`FILE_ORDER`] (200), the lowest-priority tier: they
/// lose to both environment variables and command-line arguments.
///
/// # Examples
///
/// ```rust,no_run
/// use layercfg::adapters::YamlFileSource;
/// use layercfg::ports::ConfigSource;
///
/// // Load from a specific file
/// let source = YamlFileSource::from_file("/path/to/config.yaml").unwrap();
///
/// // Load from the default OS location
/// let source = YamlFileSource::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileSource {
    /// Path to the YAML file
    file_path: PathBuf,
    /// Parsed configuration values
    values: Vec<(ConfigKey, ConfigValue)>,
}

impl YamlFileSource {
    /// Creates a source from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::SourceError`] when the path cannot be
    /// resolved or read, or a parse error when the content is not valid
    /// YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        // Canonicalize path to prevent directory traversal attacks
        let canonical_path = file_path
            .canonicalize()
            .map_err(|e| source_error("Invalid or inaccessible path", &file_path, Some(e)))?;

        // Check file size before reading to prevent DoS via large files
        let metadata = fs::metadata(&canonical_path)
            .map_err(|e| source_error("Failed to read file metadata", &canonical_path, Some(e)))?;

        if metadata.len() > MAX_YAML_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: "yaml-file".to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_YAML_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(&canonical_path).map_err(|e| {
            source_error("Failed to read configuration file", &canonical_path, Some(e))
        })?;

        let values = YamlParser::new().parse(&content)?;
        tracing::debug!(
            "Loaded {} entries from YAML file {:?}",
            values.len(),
            canonical_path.file_name()
        );

        Ok(Self {
            file_path: canonical_path,
            values,
        })
    }

    /// Creates a source from the default OS-appropriate location.
    ///
    /// Uses the `directories` crate to determine the configuration
    /// directory for the current operating system and looks for
    /// `config.yaml` inside it.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, "config.yaml")
    }

    /// Creates a source with a custom file name in the default location.
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: "yaml-file".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        let config_file = proj_dirs.config_dir().join(filename);
        Self::from_file(config_file)
    }

    /// Returns the resolved path of the backing file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigSource for YamlFileSource {
    fn name(&self) -> &str {
        "yaml-file"
    }

    fn order(&self) -> i32 {
        FILE_ORDER
    }

    fn load(&self) -> Result<Vec<(ConfigKey, ConfigValue)>> {
        Ok(self.values.clone())
    }
}

fn source_error(message: &str, path: &Path, cause: Option<std::io::Error>) -> ConfigError {
    ConfigError::SourceError {
        source_name: "yaml-file".to_string(),
        message: format!(
            "{}: {}",
            message,
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("<unknown>")
        ),
        source: cause.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    }
}
