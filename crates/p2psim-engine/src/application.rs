//! # p2psim-engine::application
//!
//! A node may host zero or more applications: a second, orthogonal
//! plug-in point alongside [`crate::behavior::Behavior`]. Shape mirrors
//! `Behavior` exactly; the core ships only a pass-through default.

use crate::registry::Registry;
use p2psim_types::id::NodeId;

pub trait Application: Send + Sync {
    fn init(&mut self, node_id: NodeId);
    fn finish(&mut self);
}

#[derive(Debug, Default)]
pub struct DefaultApplication {
    node_id: NodeId,
}

impl Application for DefaultApplication {
    fn init(&mut self, node_id: NodeId) {
        self.node_id = node_id;
    }

    fn finish(&mut self) {}
}

pub static APPLICATION_REGISTRY: Registry<dyn Application> = Registry::new("application");

pub fn register_defaults() {
    let _ = APPLICATION_REGISTRY.register("default_application", || {
        Box::<DefaultApplication>::default()
    });
}
