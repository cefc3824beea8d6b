//! # p2psim-engine::global_network
//!
//! The single fabric instance shared by every node in a simulation. It
//! never holds node references, only `NodeId`s (see the cycle note on
//! `Node <-> NodeNetwork <-> GlobalNetwork <-> Node` in the crate's design
//! notes) — `connect`/`disconnect` record bookkeeping keyed on id, and
//! `send_message` resolves recipients to ids only; the simulation's own
//! node map is what turns a delivery's destination id back into a `Node`
//! at dispatch time.

use crate::errors::SimError;
use crate::queue::{Destination, Event, EventPayload};
use crate::registry::Registry;
use crate::sampler::Sampler;
use crate::sched::Sched;
use fxhash::FxHashMap;
use p2psim_types::{
    config::DefaultGlobalNetworkSection,
    delivery::{DeliveryMode, DeliveryTargets},
    event_type,
    id::NodeId,
    message::Message,
    node_type::NodeType,
};

pub trait GlobalNetworkHandlers: Send + Sync {
    fn init(&mut self);
    fn finish(&mut self);
}

/// Idempotent per-node connection bookkeeping plus the two latency
/// samplers. `node_types` backs the per-type ordered lists (`Vec<NodeId>`,
/// compacted on removal via swap-with-last, matching `disconnect`'s
/// documented algorithm) and the broadcast-enablement map.
#[derive(Debug)]
pub struct GlobalNetwork {
    node_types: FxHashMap<NodeId, NodeType>,
    by_type: FxHashMap<NodeType, Vec<NodeId>>,
    broadcast_enabled: FxHashMap<NodeId, bool>,
    broadcast_sampler: Sampler,
    p2p_sampler: Sampler,
    initialized: bool,
}

impl GlobalNetwork {
    pub fn new(broadcast_sampler: Sampler, p2p_sampler: Sampler) -> Self {
        Self {
            node_types: FxHashMap::default(),
            by_type: FxHashMap::default(),
            broadcast_enabled: FxHashMap::default(),
            broadcast_sampler,
            p2p_sampler,
            initialized: false,
        }
    }

    pub fn from_config(section: &DefaultGlobalNetworkSection) -> Result<Self, SimError> {
        let broadcast_sampler =
            Sampler::from_config(&section.broadcast_distribution, &section.broadcast_config)?;
        let p2p_sampler = Sampler::from_config(&section.p2p_distribution, &section.p2p_config)?;
        Ok(Self::new(broadcast_sampler, p2p_sampler))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn init(&mut self) {
        self.initialized = true;
    }

    pub fn finish(&mut self) {
        self.initialized = false;
    }

    /// Idempotent. On first insertion applies the type default
    /// (`NodeType::default_broadcast_enabled`); re-connecting an already
    /// connected node leaves its current broadcast flag untouched.
    pub fn connect(&mut self, id: NodeId, node_type: NodeType) {
        if self.node_types.contains_key(&id) {
            return;
        }
        self.node_types.insert(id, node_type);
        self.by_type.entry(node_type).or_default().push(id);
        self.broadcast_enabled
            .insert(id, node_type.default_broadcast_enabled());
    }

    /// Removes `id` from all three maps. The per-type list is compacted
    /// with swap-remove, matching "swap-with-last to keep per-type list
    /// compact" rather than a shift-preserving removal.
    pub fn disconnect(&mut self, id: NodeId) {
        let Some(node_type) = self.node_types.remove(&id) else {
            return;
        };
        self.broadcast_enabled.remove(&id);
        if let Some(list) = self.by_type.get_mut(&node_type) {
            if let Some(pos) = list.iter().position(|&n| n == id) {
                list.swap_remove(pos);
            }
        }
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        self.node_types.contains_key(&id)
    }

    /// No-op for an unknown node, per the documented "silently no-op for
    /// unknown nodes" contract.
    pub fn enable_broadcast(&mut self, id: NodeId) {
        if let Some(flag) = self.broadcast_enabled.get_mut(&id) {
            *flag = true;
        }
    }

    pub fn disable_broadcast(&mut self, id: NodeId) {
        if let Some(flag) = self.broadcast_enabled.get_mut(&id) {
            *flag = false;
        }
    }

    pub fn is_broadcast_enabled(&self, id: NodeId) -> bool {
        self.broadcast_enabled.get(&id).copied().unwrap_or(false)
    }

    fn all_ids_except(&self, sender: NodeId) -> Vec<NodeId> {
        self.node_types
            .keys()
            .copied()
            .filter(|&id| id != sender)
            .collect()
    }

    fn ids_for_types(&self, types: &[NodeType], sender: NodeId) -> Vec<NodeId> {
        types
            .iter()
            .flat_map(|t| self.by_type.get(t).into_iter().flatten().copied())
            .filter(|&id| id != sender)
            .collect()
    }

    fn ids_for_types_except(&self, excluded: &[NodeType], sender: NodeId) -> Vec<NodeId> {
        self.by_type
            .iter()
            .filter(|(t, _)| !excluded.contains(t))
            .flat_map(|(_, ids)| ids.iter().copied())
            .filter(|&id| id != sender)
            .collect()
    }

    /// Resolves `msg`'s recipients per the four-branch delivery algorithm, draws
    /// one independent sample per recipient from the mode-appropriate
    /// sampler, and schedules one `NODE_NETWORK_MESSAGE_RECEIVED` event
    /// per recipient. Panics on a delivery mode outside the six enumerated
    /// values — a programmer error, matching "terminates the run".
    pub fn send_message(&self, sched: &mut Sched<'_>, mut msg: Message) {
        msg.time = sched.now();
        let sender = msg.sender;
        let mode = msg.delivery.mode;
        let sampler = if mode.is_broadcast() {
            &self.broadcast_sampler
        } else {
            &self.p2p_sampler
        };

        // "targets = ∅" is checked first and wins regardless of mode: an
        // empty `NodeTypes` list under a `*_NODE_TYPES` mode still means
        // "the entire node map", not "no types selected".
        let recipients = if targets_empty(&msg.delivery.targets) {
            let mut ids = self.all_ids_except(sender);
            if mode.is_broadcast() {
                ids.retain(|&id| self.is_broadcast_enabled(id));
            }
            ids
        } else {
            match (&msg.delivery.targets, mode) {
                (DeliveryTargets::Nodes(ids), DeliveryMode::P2pNodes | DeliveryMode::BroadcastNodes) => ids
                    .iter()
                    .copied()
                    .filter_map(|id| {
                        if self.node_types.contains_key(&id) {
                            Some(id)
                        } else {
                            tracing::debug!(node_id = id, "send_message target is unknown, ignoring");
                            None
                        }
                    })
                    .collect(),
                (DeliveryTargets::NodeTypes(types), m) if m.is_by_node_type() && !m.is_except() => {
                    self.ids_for_types(types, sender)
                }
                (DeliveryTargets::NodeTypes(types), m) if m.is_by_node_type() && m.is_except() => {
                    self.ids_for_types_except(types, sender)
                }
                _ => panic!("unknown or mismatched delivery mode {:?}", mode as u16),
            }
        };

        for recipient in recipients {
            let delay = sampler.sample(sched.rng());
            let event = Event::new(
                event_type::NODE_NETWORK_MESSAGE_RECEIVED,
                Some(Destination::Node(recipient)),
                EventPayload::Message(msg.clone()),
            );
            sched.schedule(event, delay);
        }
    }
}

fn targets_empty(targets: &DeliveryTargets) -> bool {
    targets.is_empty()
}

pub static GLOBAL_NETWORK_REGISTRY: Registry<GlobalNetworkFactoryOutput> =
    Registry::new("global_network");

/// The registry stores a boxed `GlobalNetwork` directly: unlike the other
/// pluggable roles, there is exactly one concrete shape for the fabric in
/// this crate (no trait indirection is needed since nothing outside the
/// kernel subclasses it), so the "factory" is just a configuration-driven
/// constructor.
pub type GlobalNetworkFactoryOutput = GlobalNetwork;

pub fn register_defaults() {
    let _ = GLOBAL_NETWORK_REGISTRY.register("default_global_network", || {
        let section = DefaultGlobalNetworkSection::default();
        Box::new(
            GlobalNetwork::from_config(&section).expect("default distribution config is valid"),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::EventQueue;
    use crate::hooks::HookBus;
    use bytes::Bytes;
    use p2psim_types::delivery::MessageDelivery;

    fn fabric() -> GlobalNetwork {
        GlobalNetwork::new(
            Sampler::Uniform { min: 1.0, max: 1.0 },
            Sampler::Uniform { min: 1.0, max: 1.0 },
        )
    }

    #[test]
    fn connect_disconnect_round_trips_state() {
        let mut net = fabric();
        net.connect(1, NodeType::Full);
        assert!(net.is_connected(1));
        assert!(net.is_broadcast_enabled(1));
        net.disconnect(1);
        assert!(!net.is_connected(1));
        assert!(!net.is_broadcast_enabled(1));
    }

    #[test]
    fn connect_is_idempotent() {
        let mut net = fabric();
        net.connect(1, NodeType::Full);
        net.disable_broadcast(1);
        net.connect(1, NodeType::Full);
        assert!(!net.is_broadcast_enabled(1), "re-connect must not reset the broadcast flag");
    }

    #[test]
    fn enable_disable_broadcast_is_identity() {
        let mut net = fabric();
        net.connect(1, NodeType::Client);
        assert!(!net.is_broadcast_enabled(1));
        net.enable_broadcast(1);
        net.disable_broadcast(1);
        assert!(!net.is_broadcast_enabled(1));
    }

    #[test]
    fn broadcast_fan_out_excludes_sender_and_disabled() {
        let mut net = fabric();
        net.connect(1, NodeType::Full);
        net.connect(2, NodeType::Full);
        net.connect(3, NodeType::Client);

        let mut queue = EventQueue::new();
        let hooks = HookBus::new();
        let mut rng = crate::rng::seeded_rng(0);
        let mut sched = Sched::new(&mut queue, &hooks, &mut rng, 0.0);

        let msg = Message::new(1, 7, Bytes::new(), MessageDelivery::broadcast_all());
        net.send_message(&mut sched, msg);

        assert_eq!(queue.len(), 1, "only node 2 is FULL, broadcast-enabled, and not the sender");
    }

    #[test]
    fn p2p_by_node_type_excludes_sender() {
        let mut net = fabric();
        net.connect(1, NodeType::Full);
        net.connect(2, NodeType::Full);
        net.connect(3, NodeType::Client);

        let mut queue = EventQueue::new();
        let hooks = HookBus::new();
        let mut rng = crate::rng::seeded_rng(0);
        let mut sched = Sched::new(&mut queue, &hooks, &mut rng, 0.0);

        let msg = Message::new(
            3,
            7,
            Bytes::new(),
            MessageDelivery {
                mode: DeliveryMode::P2pNodeTypes,
                targets: DeliveryTargets::NodeTypes(vec![NodeType::Full]),
            },
        );
        net.send_message(&mut sched, msg);

        assert_eq!(queue.len(), 2, "both FULL nodes receive it, sender 3 is CLIENT so never a target anyway");
    }

    #[test]
    fn disconnect_stops_future_deliveries() {
        let mut net = fabric();
        net.connect(1, NodeType::Full);
        net.connect(2, NodeType::Full);
        net.disconnect(2);

        let mut queue = EventQueue::new();
        let hooks = HookBus::new();
        let mut rng = crate::rng::seeded_rng(0);
        let mut sched = Sched::new(&mut queue, &hooks, &mut rng, 0.0);

        let msg = Message::new(1, 7, Bytes::new(), MessageDelivery::broadcast_all());
        net.send_message(&mut sched, msg);
        assert!(queue.is_empty(), "node 2 was disconnected, node 1 is the sender");
    }
}
