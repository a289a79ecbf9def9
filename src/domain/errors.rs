// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur when working with the
//! configuration store, the bounded containers, and the singleton registry.
//! All errors use `thiserror` for proper error handling and conversion.

use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// This enum represents all possible errors that can occur when building,
/// reading, or resolving configuration. It is marked as `#[non_exhaustive]`
/// to allow for future additions without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use layercfg::domain::errors::ConfigError;
///
/// fn resolve_helper() -> Result<(), ConfigError> {
///     Err(ConfigError::ImplementationNotFound {
///         name: "JsonFormatter".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A bounded container was constructed with a capacity of zero.
    #[error("Invalid capacity: {capacity} (must be greater than zero)")]
    InvalidCapacity {
        /// The rejected capacity value
        capacity: usize,
    },

    /// No default implementation is registered under the requested name.
    ///
    /// This is a static composition problem and is not retryable: the
    /// registration table was built without an entry for this name.
    #[error("No default implementation registered for '{name}'")]
    ImplementationNotFound {
        /// The name that failed to resolve
        name: String,
    },

    /// A resolved instance does not satisfy the requested type.
    #[error("Implementation registered for '{name}' is not a {expected}")]
    ImplementationMismatch {
        /// The name the instance is cached under
        name: String,
        /// The type the caller requested
        expected: String,
    },

    /// A configuration value has the wrong kind for the requested conversion.
    #[error("Configuration value for key '{key}' has kind {actual}, expected {expected}")]
    ValueKindMismatch {
        /// The key whose value was accessed
        key: String,
        /// The kind the caller requested
        expected: &'static str,
        /// The kind actually stored
        actual: &'static str,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a configuration file or value.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// Implement conversions from common parsing errors to TypeConversionError
impl ConfigError {
    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
