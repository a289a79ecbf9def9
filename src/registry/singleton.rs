// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lazily-initialized singleton registry.
//!
//! This module provides `SingletonRegistry`, a cache of named helper
//! instances constructed at most once each. Construction is guarded by
//! double-checked locking: a lock-free-read probe, then an exclusive init
//! section that re-checks before constructing. Default implementations are
//! resolved through an explicit registration table built at composition
//! time, so a missing implementation is a table lookup failure rather than a
//! runtime classpath hunt.

use crate::domain::{ConfigError, Result};
use crate::storage::context::{AnyContext, AnyValue};
use once_cell::sync::Lazy;
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// A registered constructor for a default implementation.
type Factory = Box<dyn Fn() -> AnyValue + Send + Sync>;

static GLOBAL: Lazy<SingletonRegistry> = Lazy::new(SingletonRegistry::new);

/// A cache of lazily-constructed named singleton instances.
///
/// For a given name, at most one instance is ever constructed, even under
/// contended concurrent first access, and entries are never evicted or
/// replaced. Resolution failures surface at first use of a name, not at
/// registry construction.
///
/// Registries are ordinary values intended to be constructed at composition
/// time and passed to the code that needs them. For processes that want a
/// single shared registry, [`global()`](Self::global) returns the one
/// process-wide instance.
///
/// # Examples
///
/// ```
/// use layercfg::registry::SingletonRegistry;
///
/// struct Counter;
///
/// let registry = SingletonRegistry::new();
/// let a = registry.get_or_create("counter", || Counter).unwrap();
/// let b = registry.get_or_create("counter", || Counter).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// ```
pub struct SingletonRegistry {
    instances: AnyContext<String>,
    factories: RwLock<HashMap<String, Factory>>,
    aliases: RwLock<HashMap<String, String>>,
    init_lock: Mutex<()>,
}

impl SingletonRegistry {
    /// Creates an empty registry with no registered defaults.
    pub fn new() -> Self {
        Self {
            instances: AnyContext::new(),
            factories: RwLock::new(HashMap::new()),
            aliases: RwLock::new(HashMap::new()),
            init_lock: Mutex::new(()),
        }
    }

    /// Returns the process-wide registry.
    ///
    /// This is the one documented shared instance; prefer passing an
    /// explicitly constructed registry where the composition allows it.
    pub fn global() -> &'static SingletonRegistry {
        &GLOBAL
    }

    /// Registers the default constructor for type `T` under its simple type
    /// name.
    ///
    /// Registration is expected at composition time, before the first
    /// resolution of `T`. A factory registered after the first resolution
    /// never runs: the first construction pins the cached instance.
    pub fn register_default<T, F>(&self, factory: F)
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register_named(simple_type_name::<T>(), factory);
    }

    /// Registers a constructor under an explicit name.
    pub fn register_named<T, F>(&self, name: impl Into<String>, factory: F)
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let mut factories = self.factories.write().unwrap_or_else(|e| e.into_inner());
        factories.insert(name.into(), Box::new(move || Arc::new(factory())));
    }

    /// Declares that resolutions asking for `requested` should construct the
    /// implementation registered under `target` instead.
    ///
    /// This lets a type family (for example, JSON handling) resolve to a
    /// differently-named concrete implementation.
    pub fn alias(&self, requested: impl Into<String>, target: impl Into<String>) {
        let mut aliases = self.aliases.write().unwrap_or_else(|e| e.into_inner());
        aliases.insert(requested.into(), target.into());
    }

    /// Returns `true` if a constructor is registered under `name` (after
    /// alias substitution).
    ///
    /// Lets composition code verify the table is complete before first use.
    pub fn has_default(&self, name: &str) -> bool {
        let name = self.resolve_alias(name);
        let factories = self.factories.read().unwrap_or_else(|e| e.into_inner());
        factories.contains_key(&name)
    }

    /// Returns the cached instance for `name`, constructing it with
    /// `factory` if absent.
    ///
    /// The factory is invoked at most once per name ever, even when many
    /// threads race on first access. The factory must not resolve from the
    /// same registry, as the init section is held while it runs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ImplementationMismatch`] if the instance
    /// cached under `name` is not a `T`.
    pub fn get_or_create<T, F>(&self, name: &str, factory: F) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        let erased = self.get_or_create_raw(name, || Arc::new(factory()));
        downcast::<T>(name, erased)
    }

    /// Resolves the default implementation for type `T`.
    ///
    /// The name is `T`'s simple type name, run through the alias table. The
    /// constructor comes from the registration table; the constructed
    /// instance is cached so repeated resolutions return the identical
    /// instance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ImplementationNotFound`] if no constructor is
    /// registered under the resolved name, or
    /// [`ConfigError::ImplementationMismatch`] if the registered
    /// constructor does not produce a `T`.
    pub fn resolve_default<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        let name = self.resolve_alias(simple_type_name::<T>());

        // Fast path: already constructed.
        if let Some(existing) = self.instances.get_raw(&name) {
            return downcast::<T>(&name, existing);
        }

        let _init = self.init_lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = self.instances.get_raw(&name) {
            return downcast::<T>(&name, existing);
        }

        let instance = {
            let factories = self.factories.read().unwrap_or_else(|e| e.into_inner());
            let factory =
                factories
                    .get(&name)
                    .ok_or_else(|| ConfigError::ImplementationNotFound {
                        name: name.clone(),
                    })?;
            factory()
        };
        self.instances.save_raw(name.clone(), instance.clone());
        tracing::debug!("Constructed default implementation '{}'", name);
        downcast::<T>(&name, instance)
    }

    /// Double-checked construction of the erased instance for `name`.
    fn get_or_create_raw(&self, name: &str, make: impl FnOnce() -> AnyValue) -> AnyValue {
        if let Some(existing) = self.instances.get_raw(&name.to_string()) {
            return existing;
        }

        let _init = self.init_lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = self.instances.get_raw(&name.to_string()) {
            return existing;
        }

        let instance = make();
        self.instances.save_raw(name.to_string(), instance.clone());
        tracing::debug!("Constructed singleton '{}'", name);
        instance
    }

    fn resolve_alias(&self, name: &str) -> String {
        let aliases = self.aliases.read().unwrap_or_else(|e| e.into_inner());
        aliases
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

impl Default for SingletonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SingletonRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonRegistry")
            .field("instances", &self.instances.len())
            .finish()
    }
}

fn downcast<T: Any + Send + Sync>(name: &str, value: AnyValue) -> Result<Arc<T>> {
    value
        .downcast::<T>()
        .map_err(|_| ConfigError::ImplementationMismatch {
            name: name.to_string(),
            expected: simple_type_name::<T>().to_string(),
        })
}

/// Returns the unqualified name of `T`, e.g. `JsonFormatter` for
/// `crate::helpers::JsonFormatter`.
fn simple_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
