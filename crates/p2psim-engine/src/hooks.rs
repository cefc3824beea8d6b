//! # p2psim-engine::hooks
//!
//! The observer registry firing at the three lifecycle points of event
//! dispatch. Handlers are plain `fn` pointers rather than boxed closures:
//! that lets duplicate registration ("same handler under the same slot is
//! a no-op") be implemented as pointer equality instead of needing an
//! identity wrapper, and keeps the bus `Copy`-cheap to hand around.

use crate::queue::Event;
use crate::sched::Sched;
use fxhash::FxHashMap;

/// `scheduled`/`pre-trigger`/`post-trigger` handlers all share this shape.
/// A handler may schedule further events through `sched`; it must not
/// touch `event.state` directly (pre-trigger handlers call `event.abort()`
/// instead, which is the only state mutation the bus permits).
pub type HookHandler = fn(&mut Sched<'_>, &mut Event);

#[derive(Default)]
struct HookTable {
    by_type: FxHashMap<u16, Vec<HookHandler>>,
    wildcard: Vec<HookHandler>,
}

impl HookTable {
    fn register(&mut self, event_type: Option<u16>, handler: HookHandler) {
        let list = match event_type {
            Some(t) => self.by_type.entry(t).or_default(),
            None => &mut self.wildcard,
        };
        if !list.contains(&handler) {
            list.push(handler);
        }
    }

    /// Wildcard handlers fire first in registration order, then
    /// type-specific handlers in registration order.
    fn fire(&self, sched: &mut Sched<'_>, event: &mut Event) {
        for handler in &self.wildcard {
            handler(sched, event);
        }
        if let Some(list) = self.by_type.get(&event.event_type) {
            for handler in list {
                handler(sched, event);
            }
        }
    }
}

#[derive(Default)]
pub struct HookBus {
    scheduled: HookTable,
    pre: HookTable,
    post: HookTable,
}

impl HookBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_scheduled(&mut self, event_type: u16, handler: HookHandler) {
        self.scheduled.register(Some(event_type), handler);
    }
    pub fn register_scheduled_all(&mut self, handler: HookHandler) {
        self.scheduled.register(None, handler);
    }
    pub fn register_pre(&mut self, event_type: u16, handler: HookHandler) {
        self.pre.register(Some(event_type), handler);
    }
    pub fn register_pre_all(&mut self, handler: HookHandler) {
        self.pre.register(None, handler);
    }
    pub fn register_post(&mut self, event_type: u16, handler: HookHandler) {
        self.post.register(Some(event_type), handler);
    }
    pub fn register_post_all(&mut self, handler: HookHandler) {
        self.post.register(None, handler);
    }

    pub fn fire_scheduled(&self, sched: &mut Sched<'_>, event: &mut Event) {
        self.scheduled.fire(sched, event);
    }
    pub fn fire_pre(&self, sched: &mut Sched<'_>, event: &mut Event) {
        self.pre.fire(sched, event);
    }
    pub fn fire_post(&self, sched: &mut Sched<'_>, event: &mut Event) {
        self.post.fire(sched, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::EventPayload;
    use p2psim_types::event_type::GENERIC;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static CALLS: AtomicUsize = AtomicUsize::new(0);

    fn bump(_sched: &mut Sched<'_>, _event: &mut Event) {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn duplicate_registration_is_a_no_op() {
        let mut bus = HookBus::new();
        bus.register_pre(GENERIC, bump);
        bus.register_pre(GENERIC, bump);
        assert_eq!(bus.pre.by_type.get(&GENERIC).unwrap().len(), 1);
    }

    #[test]
    fn wildcard_fires_before_type_specific() {
        static ORDER: AtomicUsize = AtomicUsize::new(0);
        fn wildcard(_s: &mut Sched<'_>, _e: &mut Event) {
            assert_eq!(ORDER.fetch_add(1, Ordering::SeqCst), 0);
        }
        fn specific(_s: &mut Sched<'_>, _e: &mut Event) {
            assert_eq!(ORDER.fetch_add(1, Ordering::SeqCst), 1);
        }
        let mut bus = HookBus::new();
        bus.register_pre_all(wildcard);
        bus.register_pre(GENERIC, specific);

        let mut queue = crate::queue::EventQueue::new();
        let mut rng = crate::rng::seeded_rng(0);
        let other_hooks = HookBus::new();
        let mut sched = Sched::new(&mut queue, &other_hooks, &mut rng, 0.0);
        let mut event = Event::new(GENERIC, None, EventPayload::None);
        bus.fire_pre(&mut sched, &mut event);
    }
}
