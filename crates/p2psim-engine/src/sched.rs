//! # p2psim-engine::sched
//!
//! [`Sched`] is the narrow, borrowed view of the simulation that every
//! component's `handle_event` runs with: enough to schedule further events,
//! read the clock, and draw from the shared RNG, but no access to the node
//! map or the fabric. Components that need those are handed them as
//! separate, disjoint borrows by `Simulation::step` — see the module docs
//! on `crate::sim` for why the split exists.

use crate::hooks::HookBus;
use crate::queue::{Event, EventQueue};
use p2psim_types::{id::Seq, time::SimTime};
use rand_chacha::ChaCha20Rng;

pub struct Sched<'a> {
    pub(crate) queue: &'a mut EventQueue,
    pub(crate) hooks: &'a HookBus,
    pub(crate) rng: &'a mut ChaCha20Rng,
    pub(crate) now: SimTime,
}

impl<'a> Sched<'a> {
    pub fn new(
        queue: &'a mut EventQueue,
        hooks: &'a HookBus,
        rng: &'a mut ChaCha20Rng,
        now: SimTime,
    ) -> Self {
        Self {
            queue,
            hooks,
            rng,
            now,
        }
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn rng(&mut self) -> &mut ChaCha20Rng {
        self.rng
    }

    /// Stamps `event.time := now + delay`, pushes it onto the heap, then
    /// fires the `scheduled` hook. Safe to call reentrantly from within a
    /// handler invoked during the same step: the new event simply enters
    /// ordering competition with a larger `seq`. A negative delay is a
    /// programmer error, not a configuration error, so it panics rather
    /// than returning a `Result`.
    pub fn schedule(&mut self, event: Event, delay: SimTime) -> Seq {
        assert!(delay >= 0.0, "schedule() called with a negative delay ({delay})");
        let time = self.now + delay;
        let (seq, mut stamped) = self.queue.push(event, time);
        let hooks = self.hooks;
        hooks.fire_scheduled(self, &mut stamped);
        seq
    }
}
