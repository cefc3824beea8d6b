//! # p2psim-engine::node
//!
//! A node owns its node-network, its behavior, and zero or more
//! applications. `init`/`finish` fan out to each owned layer in a fixed
//! order (node network, then behavior, then applications) and schedule
//! the connect/disconnect self-events; `handle_event`
//! recognises the three lifecycle events plus the node-network ones and
//! delegates everything else to `false` (unhandled).

use crate::application::Application;
use crate::behavior::Behavior;
use crate::errors::SimError;
use crate::global_network::GlobalNetwork;
use crate::node_network::NodeNetwork;
use crate::queue::{Destination, Event, EventPayload};
use crate::registry::{NodeKindRegistry, RegistryError};
use crate::sched::Sched;
use p2psim_types::{event_type, id::NodeId, node_type::NodeType};

pub struct Node {
    pub id: NodeId,
    pub node_type: NodeType,
    pub node_network: Box<dyn NodeNetwork>,
    pub behavior: Box<dyn Behavior>,
    pub applications: Vec<Box<dyn Application>>,
    initialized: bool,
}

impl Node {
    pub fn new(
        id: NodeId,
        node_type: NodeType,
        node_network: Box<dyn NodeNetwork>,
        behavior: Box<dyn Behavior>,
        applications: Vec<Box<dyn Application>>,
    ) -> Self {
        Self {
            id,
            node_type,
            node_network,
            behavior,
            applications,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Initialising an already-initialised node is a warning, not a fatal
    /// error.
    pub fn init(&mut self, sched: &mut Sched<'_>) {
        if self.initialized {
            tracing::warn!(node_id = self.id, "node already initialized, skipping");
            return;
        }
        self.node_network.init(self.id, self.node_type);
        self.behavior.init(self.id);
        for app in &mut self.applications {
            app.init(self.id);
        }
        self.initialized = true;

        let connect = Event::new(
            event_type::NODE_NETWORK_CONNECT,
            Some(Destination::Node(self.id)),
            EventPayload::NodeNetworkConnect(self.id),
        );
        sched.schedule(connect, 0.0);
    }

    pub fn finish(&mut self, sched: &mut Sched<'_>) {
        self.node_network.finish();
        self.behavior.finish();
        for app in &mut self.applications {
            app.finish();
        }
        self.initialized = false;

        let disconnect = Event::new(
            event_type::NODE_NETWORK_DISCONNECT,
            Some(Destination::Node(self.id)),
            EventPayload::NodeNetworkConnect(self.id),
        );
        sched.schedule(disconnect, 0.0);
    }

    /// Dispatches one event addressed to this node. `fabric` is `None`
    /// only when the simulation has no global network configured, which
    /// `Simulation::run` already refuses to start without one; the
    /// connect/disconnect arms simply report unhandled in that case.
    pub fn handle_event(
        &mut self,
        sched: &mut Sched<'_>,
        fabric: Option<&mut GlobalNetwork>,
        event: &mut Event,
    ) -> bool {
        match event.event_type {
            event_type::NODE_INIT => {
                self.init(sched);
                true
            }
            event_type::NODE_FINISH => {
                self.finish(sched);
                true
            }
            event_type::NODE_NETWORK_CONNECT => match fabric {
                Some(fabric) => {
                    self.node_network.handle_connect(fabric);
                    true
                }
                None => false,
            },
            event_type::NODE_NETWORK_DISCONNECT => match fabric {
                Some(fabric) => {
                    self.node_network.handle_disconnect(fabric);
                    true
                }
                None => false,
            },
            event_type::NODE_NETWORK_MESSAGE_RECEIVED => match &event.payload {
                EventPayload::Message(msg) => {
                    let msg = msg.clone();
                    self.node_network
                        .message_received(sched, self.behavior.as_mut(), self.id, &msg)
                }
                _ => false,
            },
            _ => false,
        }
    }
}

/// Maps `setup.node_list` entry names to a `NodeType`. Separate from the
/// node-network/behavior/application registries because, unlike those,
/// there is no per-kind trait object to construct here: a `Node` is
/// always assembled from the same `Node` struct, parameterised by the
/// `NodeType` this registry resolves plus whichever node-network,
/// behavior, and application factories the parallel config lists name.
pub static NODE_KIND_REGISTRY: NodeKindRegistry = NodeKindRegistry::new();

pub fn register_defaults() {
    for (name, node_type) in [
        ("default_node", NodeType::Full),
        ("full", NodeType::Full),
        ("client", NodeType::Client),
        ("light", NodeType::Light),
        ("archive", NodeType::Archive),
        ("iot", NodeType::Iot),
        ("wallet", NodeType::Wallet),
    ] {
        match NODE_KIND_REGISTRY.register(name, node_type) {
            Ok(()) | Err(RegistryError::DuplicateRegistration { .. }) => {}
            Err(e) => panic!("{e}"),
        }
    }
}

pub fn node_kind_from_registry(name: &str) -> Result<NodeType, SimError> {
    NODE_KIND_REGISTRY.create(name).map_err(SimError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::DefaultBehavior;
    use crate::hooks::HookBus;
    use crate::node_network::DefaultNodeNetwork;
    use crate::queue::EventQueue;

    fn node() -> Node {
        Node::new(
            1,
            NodeType::Full,
            Box::<DefaultNodeNetwork>::default(),
            Box::<DefaultBehavior>::default(),
            Vec::new(),
        )
    }

    #[test]
    fn init_schedules_connect_and_sets_flag() {
        let mut n = node();
        let mut queue = EventQueue::new();
        let hooks = HookBus::new();
        let mut rng = crate::rng::seeded_rng(0);
        let mut sched = Sched::new(&mut queue, &hooks, &mut rng, 0.0);
        n.init(&mut sched);
        assert!(n.is_initialized());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn re_init_is_a_warning_not_a_double_schedule() {
        let mut n = node();
        let mut queue = EventQueue::new();
        let hooks = HookBus::new();
        let mut rng = crate::rng::seeded_rng(0);
        let mut sched = Sched::new(&mut queue, &hooks, &mut rng, 0.0);
        n.init(&mut sched);
        n.init(&mut sched);
        assert_eq!(queue.len(), 1, "second init must not schedule another connect");
    }

    #[test]
    fn default_node_kinds_resolve() {
        register_defaults();
        assert_eq!(node_kind_from_registry("client").unwrap(), NodeType::Client);
    }
}
