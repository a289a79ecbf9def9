// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry layer containing the singleton registry.
//!
//! This module contains `SingletonRegistry`, the process-wide cache of
//! lazily-constructed named helper instances with an explicit registration
//! table for default implementations.

pub mod singleton;

// Re-export commonly used types
pub use singleton::SingletonRegistry;
