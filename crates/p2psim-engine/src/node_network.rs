//! # p2psim-engine::node_network
//!
//! Per-node view of the fabric: a neighbour set plus the four send helpers.
//! Connects to the [`GlobalNetwork`](crate::global_network::GlobalNetwork)
//! through the id-indexed `connect`/`disconnect` calls (never a direct node
//! reference), and reaches the fabric itself only by scheduling a
//! `GLOBAL_NETWORK_SEND_MESSAGE` event — the same cycle-breaking trick
//! applies here as at the node/fabric boundary.

use crate::behavior::Behavior;
use crate::global_network::GlobalNetwork;
use crate::queue::{Destination, Event, EventPayload};
use crate::registry::Registry;
use crate::sched::Sched;
use bytes::Bytes;
use fxhash::FxHashSet;
use p2psim_types::{
    delivery::MessageDelivery,
    event_type,
    id::NodeId,
    message::Message,
    node_type::NodeType,
};

pub trait NodeNetwork: Send + Sync {
    fn init(&mut self, node_id: NodeId, node_type: NodeType);
    fn finish(&mut self);

    fn add_neighbor(&mut self, id: NodeId);
    fn remove_neighbor(&mut self, id: NodeId);
    fn is_neighbor(&self, id: NodeId) -> bool;
    fn neighbors(&self) -> Vec<NodeId>;

    /// Invoked when this node's `NODE_NETWORK_CONNECT` event dispatches:
    /// disconnects first (in case of a stale prior registration) then
    /// reconnects, making reconnection idempotent.
    fn handle_connect(&mut self, fabric: &mut GlobalNetwork);
    fn handle_disconnect(&mut self, fabric: &mut GlobalNetwork);

    fn send_node(&self, sched: &mut Sched<'_>, node_id: NodeId, tag: u32, data: Bytes, target: NodeId);
    fn send_neighbors(&self, sched: &mut Sched<'_>, node_id: NodeId, tag: u32, data: Bytes);
    fn send_broadcast(&self, sched: &mut Sched<'_>, node_id: NodeId, tag: u32, data: Bytes);
    fn send_message(&self, sched: &mut Sched<'_>, msg: Message);

    fn message_received(
        &mut self,
        sched: &mut Sched<'_>,
        behavior: &mut dyn Behavior,
        node_id: NodeId,
        msg: &Message,
    ) -> bool;
}

#[derive(Debug, Default)]
pub struct DefaultNodeNetwork {
    node_id: NodeId,
    node_type: NodeType,
    neighbors: FxHashSet<NodeId>,
    initialized: bool,
}

impl NodeNetwork for DefaultNodeNetwork {
    fn init(&mut self, node_id: NodeId, node_type: NodeType) {
        self.node_id = node_id;
        self.node_type = node_type;
        self.initialized = true;
    }

    fn finish(&mut self) {
        self.initialized = false;
    }

    fn add_neighbor(&mut self, id: NodeId) {
        self.neighbors.insert(id);
    }

    fn remove_neighbor(&mut self, id: NodeId) {
        self.neighbors.remove(&id);
    }

    fn is_neighbor(&self, id: NodeId) -> bool {
        self.neighbors.contains(&id)
    }

    fn neighbors(&self) -> Vec<NodeId> {
        self.neighbors.iter().copied().collect()
    }

    fn handle_connect(&mut self, fabric: &mut GlobalNetwork) {
        fabric.disconnect(self.node_id);
        fabric.connect(self.node_id, self.node_type);
    }

    fn handle_disconnect(&mut self, fabric: &mut GlobalNetwork) {
        fabric.disconnect(self.node_id);
    }

    fn send_node(&self, sched: &mut Sched<'_>, node_id: NodeId, tag: u32, data: Bytes, target: NodeId) {
        let msg = Message::new(node_id, tag, data, MessageDelivery::p2p_nodes(vec![target]));
        self.send_message(sched, msg);
    }

    fn send_neighbors(&self, sched: &mut Sched<'_>, node_id: NodeId, tag: u32, data: Bytes) {
        let msg = Message::new(
            node_id,
            tag,
            data,
            MessageDelivery::p2p_nodes(self.neighbors()),
        );
        self.send_message(sched, msg);
    }

    fn send_broadcast(&self, sched: &mut Sched<'_>, node_id: NodeId, tag: u32, data: Bytes) {
        let msg = Message::new(node_id, tag, data, MessageDelivery::broadcast_all());
        self.send_message(sched, msg);
    }

    fn send_message(&self, sched: &mut Sched<'_>, msg: Message) {
        let event = Event::new(
            event_type::GLOBAL_NETWORK_SEND_MESSAGE,
            Some(Destination::GlobalNetwork),
            EventPayload::Message(msg),
        );
        sched.schedule(event, 0.0);
    }

    fn message_received(
        &mut self,
        sched: &mut Sched<'_>,
        behavior: &mut dyn Behavior,
        node_id: NodeId,
        msg: &Message,
    ) -> bool {
        let _ = node_id;
        behavior.message_received(sched, self, msg)
    }
}

pub static NODE_NETWORK_REGISTRY: Registry<dyn NodeNetwork> = Registry::new("node_network");

pub fn register_defaults() {
    let _ = NODE_NETWORK_REGISTRY.register("default_node_network", || {
        Box::<DefaultNodeNetwork>::default()
    });
}
