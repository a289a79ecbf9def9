// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store layer containing the priority-layered configuration store.
//!
//! This module contains `ConfigStore`, the keyed collection of prioritized
//! configuration items with merge semantics, and the builder that layers
//! configuration sources into one effective store.

pub mod config_store;

// Re-export commonly used types
pub use config_store::{ConfigStore, ConfigStoreBuilder, PutOutcome, DEFAULT_ORDER};
