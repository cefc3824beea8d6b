//! # p2psim-engine::behavior
//!
//! The protocol-logic plug-in point. The core ships only
//! [`DefaultBehavior`], a pass-through that accepts every message; real
//! consensus/gossip/whatever logic is expected to register its own
//! implementation under a configuration-selected name.

use crate::node_network::NodeNetwork;
use crate::registry::Registry;
use crate::sched::Sched;
use p2psim_types::{id::NodeId, message::Message};

pub trait Behavior: Send + Sync {
    fn init(&mut self, node_id: NodeId);
    fn finish(&mut self);

    /// Returns whether the message was recognized and handled. May call
    /// back into `net` to reply or forward.
    fn message_received(&mut self, sched: &mut Sched<'_>, net: &mut dyn NodeNetwork, msg: &Message) -> bool;
}

#[derive(Debug, Default)]
pub struct DefaultBehavior {
    node_id: NodeId,
}

impl Behavior for DefaultBehavior {
    fn init(&mut self, node_id: NodeId) {
        self.node_id = node_id;
    }

    fn finish(&mut self) {}

    fn message_received(&mut self, _sched: &mut Sched<'_>, _net: &mut dyn NodeNetwork, _msg: &Message) -> bool {
        true
    }
}

pub static BEHAVIOR_REGISTRY: Registry<dyn Behavior> = Registry::new("behavior");

pub fn register_defaults() {
    let _ = BEHAVIOR_REGISTRY.register("default_behavior", || Box::<DefaultBehavior>::default());
}
