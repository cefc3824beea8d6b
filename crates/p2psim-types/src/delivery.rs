//! # p2psim-types::delivery
//!
//! The six-way delivery-mode enumeration from `core/message.go`
//! (`MESSAGE_DELIVERY_TYPE_*`) and the `MessageDelivery` value that pairs a
//! mode with its target list. `targets` is `DeliveryTargets::All` when the
//! caller omits an explicit list, which the fabric's `send_message`
//! algorithm interprets as "every node" under the selected mode.

use crate::node_type::NodeType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum DeliveryMode {
    P2pNodes = 0,
    P2pNodeTypes = 1,
    P2pNodeTypesExcept = 2,
    BroadcastNodes = 3,
    BroadcastNodeTypes = 4,
    BroadcastNodeTypesExcept = 5,
}

impl DeliveryMode {
    pub fn is_broadcast(self) -> bool {
        matches!(
            self,
            DeliveryMode::BroadcastNodes
                | DeliveryMode::BroadcastNodeTypes
                | DeliveryMode::BroadcastNodeTypesExcept
        )
    }

    pub fn is_by_node_type(self) -> bool {
        matches!(
            self,
            DeliveryMode::P2pNodeTypes
                | DeliveryMode::P2pNodeTypesExcept
                | DeliveryMode::BroadcastNodeTypes
                | DeliveryMode::BroadcastNodeTypesExcept
        )
    }

    pub fn is_except(self) -> bool {
        matches!(
            self,
            DeliveryMode::P2pNodeTypesExcept | DeliveryMode::BroadcastNodeTypesExcept
        )
    }
}

/// The target list half of a `MessageDelivery`. An empty list (`Nodes(vec![])`
/// or `NodeTypes(vec![])`) is treated identically to `All` by the fabric,
/// matching "`targets = ∅` means all nodes under the selected mode".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DeliveryTargets {
    All,
    Nodes(Vec<crate::id::NodeId>),
    NodeTypes(Vec<NodeType>),
}

impl DeliveryTargets {
    pub fn is_empty(&self) -> bool {
        match self {
            DeliveryTargets::All => true,
            DeliveryTargets::Nodes(v) => v.is_empty(),
            DeliveryTargets::NodeTypes(v) => v.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDelivery {
    pub mode: DeliveryMode,
    pub targets: DeliveryTargets,
}

impl MessageDelivery {
    pub fn p2p_nodes(targets: Vec<crate::id::NodeId>) -> Self {
        Self {
            mode: DeliveryMode::P2pNodes,
            targets: DeliveryTargets::Nodes(targets),
        }
    }

    pub fn broadcast_all() -> Self {
        Self {
            mode: DeliveryMode::BroadcastNodes,
            targets: DeliveryTargets::All,
        }
    }
}
