//! # p2psim-types::node_type
//!
//! The node-type enumeration (`core/node.go`'s `NODE_TYPE_FULL`..
//! `NODE_TYPE_WALLET`). Modeled as a `#[repr(u16)]` enum throughout rather
//! than a raw integer, so that delivery-mode target lists for
//! `*_NODE_TYPES` variants are `Vec<NodeType>` and never collide with the
//! 32-bit `NodeId` space.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Full = 0,
    Client = 1,
    Light = 2,
    Archive = 3,
    Iot = 4,
    Wallet = 5,
}

impl NodeType {
    /// `FULL` and `ARCHIVE` receive global broadcasts by default on connect;
    /// every other type starts with broadcast delivery disabled.
    pub fn default_broadcast_enabled(self) -> bool {
        matches!(self, NodeType::Full | NodeType::Archive)
    }

    pub fn all() -> [NodeType; 6] {
        [
            NodeType::Full,
            NodeType::Client,
            NodeType::Light,
            NodeType::Archive,
            NodeType::Iot,
            NodeType::Wallet,
        ]
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeType::Full => "full",
            NodeType::Client => "client",
            NodeType::Light => "light",
            NodeType::Archive => "archive",
            NodeType::Iot => "iot",
            NodeType::Wallet => "wallet",
        };
        f.write_str(name)
    }
}
