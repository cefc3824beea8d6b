//! # p2psim-types::event_type
//!
//! The namespaced 16-bit event-type plan from `core/events.go`. These
//! numbers are part of the wire contract: hook registrations and log output
//! key on them, so they must be preserved verbatim across implementations.

/// Type-agnostic; used by callers that don't care about dispatch.
pub const GENERIC: u16 = 0;

// --- Simulation control (1-9) ---
pub const STOP: u16 = 1;
pub const ADD_NODE: u16 = 2;
pub const REMOVE_NODE: u16 = 3;

// --- Node lifecycle (10-19) ---
pub const NODE_INIT: u16 = 10;
pub const NODE_FINISH: u16 = 11;
pub const NODE_ADD_APPLICATION: u16 = 12;

// --- Global network fabric (20-29) ---
pub const GLOBAL_NETWORK_INIT: u16 = 20;
pub const GLOBAL_NETWORK_SEND_MESSAGE: u16 = 21;

// --- Node network (30-39) ---
pub const NODE_NETWORK_MESSAGE_RECEIVED: u16 = 30;
pub const NODE_NETWORK_CONNECT: u16 = 31;
pub const NODE_NETWORK_DISCONNECT: u16 = 32;

// --- Block (40-49); reserved, body is a no-op pending the ledger layer ---
pub const BLOCK_NEW: u16 = 40;

/// Start of the user plugin-reserved range (30001-65535).
pub const USER_PLUGIN_MIN: u16 = 30001;

/// Human-readable name for the well-known event types, used by logging.
/// Falls back to `None` for anything in the user-reserved range.
pub fn name(event_type: u16) -> Option<&'static str> {
    Some(match event_type {
        GENERIC => "GENERIC",
        STOP => "STOP",
        ADD_NODE => "ADD_NODE",
        REMOVE_NODE => "REMOVE_NODE",
        NODE_INIT => "NODE_INIT",
        NODE_FINISH => "NODE_FINISH",
        NODE_ADD_APPLICATION => "NODE_ADD_APPLICATION",
        GLOBAL_NETWORK_INIT => "GLOBAL_NETWORK_INIT",
        GLOBAL_NETWORK_SEND_MESSAGE => "GLOBAL_NETWORK_SEND_MESSAGE",
        NODE_NETWORK_MESSAGE_RECEIVED => "NODE_NETWORK_MESSAGE_RECEIVED",
        NODE_NETWORK_CONNECT => "NODE_NETWORK_CONNECT",
        NODE_NETWORK_DISCONNECT => "NODE_NETWORK_DISCONNECT",
        BLOCK_NEW => "BLOCK_NEW",
        _ => return None,
    })
}
