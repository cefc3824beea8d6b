//! # p2psim-types::message
//!
//! The `Message` carried over the global network fabric (`core/message.go`).
//! Immutable payload plus routing metadata; `time` is stamped by the fabric
//! at send time, not by the caller.

use crate::{delivery::MessageDelivery, id::NodeId, time::SimTime};
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct Message {
    pub data: Bytes,
    pub size: usize,
    pub sender: NodeId,
    pub delivery: MessageDelivery,
    pub tag: u32,
    pub time: SimTime,
}

impl Message {
    /// Builds a message with `size` derived from `data` and `time` left at
    /// zero; the fabric stamps `time := now()` when `send_message` dispatches.
    pub fn new(sender: NodeId, tag: u32, data: Bytes, delivery: MessageDelivery) -> Self {
        let size = data.len();
        Self {
            data,
            size,
            sender,
            delivery,
            tag,
            time: 0.0,
        }
    }
}
