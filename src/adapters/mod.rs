// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing configuration source implementations.
//!
//! This module contains concrete implementations of the `ConfigSource`
//! trait defined in the ports layer, one per configuration source.

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "env")]
pub mod env_var;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
#[cfg(feature = "cli")]
pub use cli::CommandLineSource;
#[cfg(feature = "env")]
pub use env_var::EnvVarSource;
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlFileSource, YamlParser};
