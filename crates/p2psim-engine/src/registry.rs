//! # p2psim-engine::registry
//!
//! The name-to-constructor tables backing every pluggable role (global
//! network, node kind, node network, behavior, consensus, application,
//! global state, end condition, measurement module). One [`Registry<T>`]
//! instance per role, declared as a process-wide `static` in that role's
//! own module and lazily initialized on first use via `OnceLock` — the
//! systems-language rendition of "a process-scoped registry object
//! initialised once, threaded through `init()`".
//!
//! `register()` rejects a duplicate name and `create()` rejects an unknown
//! one, each by returning a [`RegistryError`] rather than panicking; callers
//! such as `Simulation::from_config` propagate it as a run-stopping
//! `SimError` before any event fires, which is what makes a misconfigured
//! registry name "fatal" in this crate's sense of the word. Both operations
//! are read/write through a `RwLock` per the write-for-mutation,
//! read-for-iteration discipline used everywhere shared state is touched in
//! this crate.

use crate::errors::RegistryError;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

type Factory<T> = Arc<dyn Fn() -> Box<T> + Send + Sync>;

pub struct Registry<T: ?Sized + 'static> {
    role: &'static str,
    map: OnceLock<RwLock<HashMap<String, Factory<T>>>>,
}

impl<T: ?Sized + 'static> Registry<T> {
    pub const fn new(role: &'static str) -> Self {
        Self {
            role,
            map: OnceLock::new(),
        }
    }

    fn map(&self) -> &RwLock<HashMap<String, Factory<T>>> {
        self.map.get_or_init(|| RwLock::new(HashMap::new()))
    }

    pub fn register<F>(&self, name: impl Into<String>, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut map = self.map().write().expect("registry lock poisoned");
        if map.contains_key(&name) {
            return Err(RegistryError::DuplicateRegistration {
                role: self.role,
                name,
            });
        }
        map.insert(name, Arc::new(factory));
        Ok(())
    }

    pub fn create(&self, name: &str) -> Result<Box<T>, RegistryError> {
        let map = self.map().read().expect("registry lock poisoned");
        match map.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(RegistryError::NotFound {
                role: self.role,
                name: name.to_string(),
            }),
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.map().read().expect("registry lock poisoned").contains_key(name)
    }

    /// Sorted snapshot of every currently registered name, for diagnostics
    /// (the CLI's `list-roles` subcommand).
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .map()
            .read()
            .expect("registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

/// End conditions take one extra string argument at construction time (the
/// time-limit factory parses its duration from it), so they get their own
/// registry shape rather than reusing `Registry<T>`.
type EndConditionFactory<T> =
    Arc<dyn Fn(&str) -> Result<Box<T>, crate::errors::SimError> + Send + Sync>;

pub struct ArgRegistry<T: ?Sized + 'static> {
    role: &'static str,
    map: OnceLock<RwLock<HashMap<String, EndConditionFactory<T>>>>,
}

impl<T: ?Sized + 'static> ArgRegistry<T> {
    pub const fn new(role: &'static str) -> Self {
        Self {
            role,
            map: OnceLock::new(),
        }
    }

    fn map(&self) -> &RwLock<HashMap<String, EndConditionFactory<T>>> {
        self.map.get_or_init(|| RwLock::new(HashMap::new()))
    }

    pub fn register<F>(&self, name: impl Into<String>, factory: F) -> Result<(), RegistryError>
    where
        F: Fn(&str) -> Result<Box<T>, crate::errors::SimError> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut map = self.map().write().expect("registry lock poisoned");
        if map.contains_key(&name) {
            return Err(RegistryError::DuplicateRegistration {
                role: self.role,
                name,
            });
        }
        map.insert(name, Arc::new(factory));
        Ok(())
    }

    pub fn create(&self, name: &str, arg: &str) -> Result<Box<T>, crate::errors::SimError> {
        let map = self.map().read().expect("registry lock poisoned");
        match map.get(name) {
            Some(factory) => factory(arg),
            None => Err(RegistryError::NotFound {
                role: self.role,
                name: name.to_string(),
            }
            .into()),
        }
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .map()
            .read()
            .expect("registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

/// The "node" role maps a configuration name to a plain [`NodeType`] value
/// rather than a boxed trait object, so it gets its own tiny registry.
pub struct NodeKindRegistry {
    map: OnceLock<RwLock<HashMap<String, p2psim_types::node_type::NodeType>>>,
}

impl NodeKindRegistry {
    pub const fn new() -> Self {
        Self {
            map: OnceLock::new(),
        }
    }

    fn map(&self) -> &RwLock<HashMap<String, p2psim_types::node_type::NodeType>> {
        self.map.get_or_init(|| RwLock::new(HashMap::new()))
    }

    pub fn register(
        &self,
        name: impl Into<String>,
        node_type: p2psim_types::node_type::NodeType,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut map = self.map().write().expect("registry lock poisoned");
        if map.contains_key(&name) {
            return Err(RegistryError::DuplicateRegistration { role: "node", name });
        }
        map.insert(name, node_type);
        Ok(())
    }

    pub fn create(&self, name: &str) -> Result<p2psim_types::node_type::NodeType, RegistryError> {
        self.map()
            .read()
            .expect("registry lock poisoned")
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::NotFound {
                role: "node",
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .map()
            .read()
            .expect("registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for NodeKindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Thing: Send + Sync {
        fn value(&self) -> u32;
    }
    struct Five;
    impl Thing for Five {
        fn value(&self) -> u32 {
            5
        }
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let reg: Registry<dyn Thing> = Registry::new("thing");
        reg.register("five", || Box::new(Five)).unwrap();
        assert!(reg.register("five", || Box::new(Five)).is_err());
    }

    #[test]
    fn unknown_name_is_rejected() {
        let reg: Registry<dyn Thing> = Registry::new("thing");
        assert!(reg.create("missing").is_err());
    }

    #[test]
    fn create_invokes_factory() {
        let reg: Registry<dyn Thing> = Registry::new("thing");
        reg.register("five", || Box::new(Five)).unwrap();
        assert_eq!(reg.create("five").unwrap().value(), 5);
    }

    #[test]
    fn names_is_sorted_and_reflects_registrations() {
        let reg: Registry<dyn Thing> = Registry::new("thing");
        reg.register("zeta", || Box::new(Five)).unwrap();
        reg.register("alpha", || Box::new(Five)).unwrap();
        assert_eq!(reg.names(), vec!["alpha".to_string(), "zeta".to_string()]);
    }
}
