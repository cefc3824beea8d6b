//! # p2psim-engine::consensus
//!
//! The third named registry role mentioned alongside behavior and
//! application: reserved for protocol plugins (Raft-like, PBFT-like,
//! whatever a real deployment needs). Consensus logic itself is out of
//! scope for this crate (see the Non-goals on Byzantine-fault consensus),
//! so only the registry slot and a no-op default are shipped, matching
//! the upstream `consensus.go`'s own `// TODO consensus layer` stub.

use crate::registry::Registry;
use p2psim_types::id::NodeId;

pub trait Consensus: Send + Sync {
    fn init(&mut self, node_id: NodeId);
    fn finish(&mut self);
}

#[derive(Debug, Default)]
pub struct NoopConsensus {
    node_id: NodeId,
}

impl Consensus for NoopConsensus {
    fn init(&mut self, node_id: NodeId) {
        self.node_id = node_id;
    }

    fn finish(&mut self) {}
}

pub static CONSENSUS_REGISTRY: Registry<dyn Consensus> = Registry::new("consensus");

pub fn register_defaults() {
    let _ = CONSENSUS_REGISTRY.register("default_consensus", || Box::<NoopConsensus>::default());
}
