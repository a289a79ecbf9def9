// SPDX-License-Identifier: MIT OR Apache-2.0

//! A priority-layered key/value configuration store.
//!
//! This crate provides a single-process, in-memory configuration engine:
//! concurrent storage with defined overwrite semantics, capacity-bounded
//! eviction, and a lazily-initialized singleton registry for named helper
//! instances.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigKey`, `ConfigValue`, `ConfigItem`,
//!   errors)
//! - **Storage Layer**: Container primitives (`BoundedMap`, the keepers,
//!   `AnyContext`)
//! - **Ports**: Trait definitions for loading (`ConfigSource`,
//!   `ConfigParser`)
//! - **Adapters**: Implementations for specific configuration sources (env
//!   vars, YAML files, CLI arguments)
//! - **Store**: The priority-layered `ConfigStore` with merge semantics
//! - **Registry**: The `SingletonRegistry` of named helper instances
//!
//! # Priority model
//!
//! Every write carries an integer order; **lower order wins** on conflict
//! and ties favor the newer value. Sources load at conventional tiers (CLI
//! 0, environment 100, files 200), so a command-line value survives a merge
//! against both.
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `env`: Enable environment variable support (default)
//! - `cli`: Enable command-line argument support (default)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use layercfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let store = ConfigStoreBuilder::new()
//!     .with_env_prefix("MYAPP_")
//!     .with_yaml_file("/etc/myapp/config.yaml")?
//!     .build()?;
//!
//! if let Some(value) = store.get_str("database.port") {
//!     let port = value.as_i64("database.port")?;
//!     println!("port: {}", port);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod registry;
pub mod storage;
pub mod store;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for
/// convenient access.
pub mod prelude {
    pub use crate::domain::{ConfigError, ConfigItem, ConfigKey, ConfigValue, Result, ValueKind};
    pub use crate::ports::{ConfigParser, ConfigSource};
    pub use crate::registry::SingletonRegistry;
    pub use crate::storage::{
        AnyContext, BoundedKeeper, BoundedMap, EvictionOrder, Keeper, MapKeeper,
    };
    pub use crate::store::{ConfigStore, ConfigStoreBuilder, PutOutcome, DEFAULT_ORDER};

    // Re-export adapters based on feature flags
    #[cfg(feature = "cli")]
    pub use crate::adapters::CommandLineSource;
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarSource;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlFileSource, YamlParser};
}
