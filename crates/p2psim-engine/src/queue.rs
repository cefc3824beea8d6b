//! # p2psim-engine::queue
//!
//! The event value type and the min-heap that orders it. Ordering is
//! `(time, seq)` ascending; `seq` is assigned at schedule time and is the
//! sole tie-breaker, which is what makes two runs with the same seed and
//! the same schedule calls produce bit-identical dispatch order regardless
//! of any pointer- or hash-derived value.

use p2psim_types::{
    id::{NodeId, Seq},
    message::Message,
    time::{cmp_sim_time, SimTime},
};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventState {
    Pending,
    Aborted,
    Handled,
    NotHandled,
}

/// Who receives a dispatched event. Holds ids, never component references,
/// so the queue never needs to borrow into the node map or the fabric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Node(NodeId),
    GlobalNetwork,
    GlobalState,
    Simulation,
}

/// Event payloads, grouped by the shape the owning event type expects.
/// Lifecycle events (`NODE_INIT`, `GLOBAL_NETWORK_INIT`, ...) carry `None`
/// because their handlers already run with direct access to the
/// simulation's scheduling context; only events that cross a subsystem
/// boundary need to carry data. `Custom` is the escape hatch for the
/// user plugin-reserved event-type range (30001-65535), which by
/// definition the kernel cannot enumerate a payload shape for up front.
#[derive(Clone)]
pub enum EventPayload {
    None,
    Message(Message),
    Application(String),
    NodeNetworkConnect(NodeId),
    Custom(std::sync::Arc<dyn std::any::Any + Send + Sync>),
}

impl std::fmt::Debug for EventPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventPayload::None => write!(f, "None"),
            EventPayload::Message(m) => f.debug_tuple("Message").field(m).finish(),
            EventPayload::Application(s) => f.debug_tuple("Application").field(s).finish(),
            EventPayload::NodeNetworkConnect(id) => {
                f.debug_tuple("NodeNetworkConnect").field(id).finish()
            }
            EventPayload::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: u16,
    pub payload: EventPayload,
    pub destination: Option<Destination>,
    pub state: EventState,
    pub time: SimTime,
    pub seq: Seq,
}

impl Event {
    pub fn new(event_type: u16, destination: Option<Destination>, payload: EventPayload) -> Self {
        Self {
            event_type,
            payload,
            destination,
            state: EventState::Pending,
            time: 0.0,
            seq: 0,
        }
    }

    /// Marks the event aborted; the scheduler discards it without firing
    /// hooks or advancing the clock once it reaches the head of the queue.
    /// Has no effect once the event has already been dispatched.
    pub fn abort(&mut self) {
        if self.state == EventState::Pending {
            self.state = EventState::Aborted;
        }
    }
}

#[derive(Debug)]
struct QueueItem {
    time: SimTime,
    seq: Seq,
    event: Event,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}
impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    /// Reversed so `BinaryHeap`, a max-heap, pops the smallest `(time, seq)`.
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_sim_time(other.time, self.time).then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<QueueItem>,
    next_seq: Seq,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps `event.time` and `event.seq`, then pushes it. Returns the
    /// assigned seq and a stamped clone so the caller can fire the
    /// `scheduled` hook without needing to borrow back into the heap.
    pub fn push(&mut self, mut event: Event, time: SimTime) -> (Seq, Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        event.time = time;
        event.seq = seq;
        let stamped = event.clone();
        self.heap.push(QueueItem { time, seq, event });
        (seq, stamped)
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|item| item.event)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_time_then_seq_order() {
        let mut q = EventQueue::new();
        q.push(Event::new(1, None, EventPayload::None), 1.0);
        q.push(Event::new(2, None, EventPayload::None), 1.0);
        q.push(Event::new(3, None, EventPayload::None), 0.5);

        let order: Vec<u16> = std::iter::from_fn(|| q.pop())
            .map(|e| e.event_type)
            .collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn empty_queue_pops_none() {
        let mut q = EventQueue::new();
        assert!(q.pop().is_none());
        assert!(q.is_empty());
    }
}
