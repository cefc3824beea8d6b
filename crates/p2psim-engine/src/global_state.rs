//! # p2psim-engine::global_state
//!
//! A key-value store shared by the whole simulation, guarded by a
//! readers-writer lock per the crate-wide discipline (write for mutation,
//! read for iteration, no lock held across an event dispatch). Also owns
//! the pre-trigger hook registration for `BLOCK_NEW`: reserved for a
//! future block registry, body intentionally empty, matching the
//! upstream source's own commented-out hash-collision-detection code.

use crate::hooks::HookBus;
use crate::queue::Event;
use crate::registry::Registry;
use crate::sched::Sched;
use p2psim_types::event_type;
use serde_json::Value;
use std::sync::RwLock;

pub trait GlobalState: Send + Sync {
    /// Registers the `BLOCK_NEW` pre-trigger hook and marks the store
    /// initialized.
    fn init(&mut self, hooks: &mut HookBus);
    fn finish(&mut self);

    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: String, value: Value);
}

#[derive(Debug, Default)]
pub struct DefaultGlobalState {
    store: RwLock<std::collections::HashMap<String, Value>>,
    initialized: bool,
}

/// Reserved for a future block registry; intentionally a no-op.
fn block_new_noop(_sched: &mut Sched<'_>, _event: &mut Event) {}

impl GlobalState for DefaultGlobalState {
    fn init(&mut self, hooks: &mut HookBus) {
        hooks.register_pre(event_type::BLOCK_NEW, block_new_noop);
        self.initialized = true;
    }

    fn finish(&mut self) {
        self.initialized = false;
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.store.read().expect("global state lock poisoned").get(key).cloned()
    }

    fn set(&mut self, key: String, value: Value) {
        self.store
            .write()
            .expect("global state lock poisoned")
            .insert(key, value);
    }
}

impl DefaultGlobalState {
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

pub static GLOBAL_STATE_REGISTRY: Registry<dyn GlobalState> = Registry::new("global_state");

pub fn register_defaults() {
    let _ = GLOBAL_STATE_REGISTRY.register("default_global_state", || {
        Box::<DefaultGlobalState>::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_round_trip() {
        let mut state = DefaultGlobalState::default();
        assert_eq!(state.get("height"), None);
        state.set("height".to_string(), Value::from(12));
        assert_eq!(state.get("height"), Some(Value::from(12)));
    }

    #[test]
    fn init_registers_block_new_hook() {
        let mut state = DefaultGlobalState::default();
        let mut hooks = HookBus::new();
        state.init(&mut hooks);
        assert!(state.is_initialized());
    }
}
