//! # p2psim-engine::simulation
//!
//! The orchestrator: owns the node map, the fabric, global state, the end
//! condition, the measurement module, and the master clock/queue/hooks/RNG
//! that every `Sched` borrows from. `Simulation::step` is where the
//! `Destination` enum gets resolved back into a concrete component — the
//! one place in the crate that holds all of the simulation's disjoint
//! pieces at once, which is exactly why `queue.rs` made `Destination`
//! id-based rather than reference-based in the first place (see the
//! crate's cycle-breaking design note). Every popped, non-aborted event is
//! handed to the measurement module before dispatch, so counts reflect
//! what the queue produced regardless of whether a handler claimed it.

use crate::application::{Application, APPLICATION_REGISTRY};
use crate::behavior::{Behavior, BEHAVIOR_REGISTRY};
use crate::end_condition::{EndCondition, END_CONDITION_REGISTRY};
use crate::errors::SimError;
use crate::global_network::{GlobalNetwork, GLOBAL_NETWORK_REGISTRY};
use crate::global_state::{GlobalState, GLOBAL_STATE_REGISTRY};
use crate::hooks::HookBus;
use crate::measurement::{DefaultMeasurementModule, MeasurementModule};
use crate::node::{node_kind_from_registry, Node};
use crate::node_network::{NodeNetwork, NODE_NETWORK_REGISTRY};
use crate::queue::{Destination, Event, EventPayload, EventQueue, EventState};
use crate::rng;
use crate::sched::Sched;
use indexmap::IndexMap;
use p2psim_types::{config::Config, event_type, id::NodeId};
use rand_chacha::ChaCha20Rng;

/// Registers every role's built-in defaults. Idempotent: duplicate
/// registration from a second call is swallowed rather than panicking, so
/// tests that build several simulations in one process don't collide.
pub fn register_builtin_defaults() {
    crate::behavior::register_defaults();
    crate::application::register_defaults();
    crate::consensus::register_defaults();
    crate::node_network::register_defaults();
    crate::node::register_defaults();
    crate::global_network::register_defaults();
    crate::global_state::register_defaults();
    crate::end_condition::register_defaults();
    crate::measurement::register_defaults();
}

pub struct Simulation {
    name: String,
    now: f64,
    running: bool,
    queue: EventQueue,
    hooks: HookBus,
    rng: ChaCha20Rng,
    nodes: IndexMap<NodeId, Node>,
    global_network: Option<GlobalNetwork>,
    global_state: Option<Box<dyn GlobalState>>,
    end_condition: Option<Box<dyn EndCondition>>,
    measurement: Box<dyn MeasurementModule>,
}

impl Simulation {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            now: 0.0,
            running: false,
            queue: EventQueue::new(),
            hooks: HookBus::new(),
            rng: rng::seeded_rng(seed),
            nodes: IndexMap::new(),
            global_network: None,
            global_state: None,
            end_condition: None,
            measurement: Box::<DefaultMeasurementModule>::default(),
        }
    }

    /// Builds a fully wired `Simulation` from a parsed [`Config`],
    /// resolving every pluggable role through its registry. Mirrors
    /// `NewSimulationFromConfig`: end condition and fabric first, then
    /// global state, then one `Node` per `(node_list[i], node_count_list[i])`
    /// pair, each assembled from the parallel network/behavior/application
    /// lists. Registry lookups return a `RegistryError` on an unknown name,
    /// propagated here via `?` into `SimError`; this function also returns
    /// `Err` for the list-length mismatches already caught by
    /// `SetupSection::validate`.
    pub fn from_config(config: &Config) -> Result<Self, SimError> {
        config.setup.validate()?;
        let mut sim = Simulation::new(config.simulation.name.clone(), config.simulation.seed);

        let (end_name, end_arg) = &config.setup.end_condition;
        let end_condition = END_CONDITION_REGISTRY.create(end_name, end_arg)?;
        sim.end_condition = Some(end_condition);

        let global_network = GLOBAL_NETWORK_REGISTRY.create(&config.setup.global_network)?;
        sim.global_network = Some(*global_network);

        let global_state = GLOBAL_STATE_REGISTRY.create(&config.setup.global_state)?;
        sim.global_state = Some(global_state);

        let setup = &config.setup;
        for idx in 0..setup.node_list.len() {
            let node_type = node_kind_from_registry(&setup.node_list[idx])?;
            let count = setup.node_count_list[idx];
            let network_name = &setup.node_network_list[idx];
            let behavior_name = &setup.node_behavior_list[idx];
            let app_names: &[String] = setup
                .node_applications_list
                .get(idx)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            for _ in 0..count {
                let node_network: Box<dyn NodeNetwork> = NODE_NETWORK_REGISTRY.create(network_name)?;
                let behavior: Box<dyn Behavior> = BEHAVIOR_REGISTRY.create(behavior_name)?;
                let applications: Result<Vec<Box<dyn Application>>, SimError> = app_names
                    .iter()
                    .map(|name| Ok(APPLICATION_REGISTRY.create(name)?))
                    .collect();
                sim.add_node_with(node_type, node_network, behavior, applications?);
            }
        }

        Ok(sim)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn hooks_mut(&mut self) -> &mut HookBus {
        &mut self.hooks
    }

    pub fn global_network(&self) -> Option<&GlobalNetwork> {
        self.global_network.as_ref()
    }

    pub fn set_global_network(&mut self, network: GlobalNetwork) {
        self.global_network = Some(network);
    }

    pub fn set_global_state(&mut self, state: Box<dyn GlobalState>) {
        self.global_state = Some(state);
    }

    pub fn set_end_condition(&mut self, cond: Box<dyn EndCondition>) {
        self.end_condition = Some(cond);
    }

    /// Defaults to [`DefaultMeasurementModule`]; replace it to route
    /// dispatched-event counts somewhere other than the `metrics` registry.
    pub fn set_measurement_module(&mut self, measurement: Box<dyn MeasurementModule>) {
        self.measurement = measurement;
    }

    fn sched(&mut self) -> Sched<'_> {
        Sched::new(&mut self.queue, &self.hooks, &mut self.rng, self.now)
    }

    /// Assigns `id := current count + 1` (1-based, insertion order), and
    /// if the simulation is already running, schedules `NODE_INIT`
    /// immediately rather than waiting for the initial `Run()` fan-out.
    pub fn add_node_with(
        &mut self,
        node_type: p2psim_types::node_type::NodeType,
        node_network: Box<dyn NodeNetwork>,
        behavior: Box<dyn Behavior>,
        applications: Vec<Box<dyn Application>>,
    ) -> NodeId {
        let id = (self.nodes.len() + 1) as NodeId;
        let node = Node::new(id, node_type, node_network, behavior, applications);
        self.nodes.insert(id, node);
        if self.running {
            let event = Event::new(
                event_type::NODE_INIT,
                Some(Destination::Node(id)),
                EventPayload::None,
            );
            let mut sched = self.sched();
            sched.schedule(event, 0.0);
        }
        id
    }

    /// Schedules `NODE_FINISH` and removes the node from the map.
    /// Removing an absent id is a recoverable error.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), SimError> {
        if !self.nodes.contains_key(&id) {
            return Err(SimError::UnknownNodeId(id));
        }
        let event = Event::new(
            event_type::NODE_FINISH,
            Some(Destination::Node(id)),
            EventPayload::None,
        );
        {
            let mut sched = self.sched();
            sched.schedule(event, 0.0);
        }
        self.nodes.shift_remove(&id);
        Ok(())
    }

    /// Routes the stop request through the queue (delay 0, destination =
    /// self) so the `running` flag only ever flips between dispatches,
    /// never mid-handler.
    pub fn request_stop(&mut self) {
        let event = Event::new(
            event_type::STOP,
            Some(Destination::Simulation),
            EventPayload::None,
        );
        let mut sched = self.sched();
        sched.schedule(event, 0.0);
    }

    /// Schedules an event from outside any handler (e.g. before `run()`,
    /// or from test setup). `Sched::schedule` is the in-handler path;
    /// this is its top-level counterpart. A negative delay panics, same as
    /// `Sched::schedule`.
    pub fn schedule(&mut self, event: Event, delay: f64) -> crate::queue::Event {
        let mut sched = self.sched();
        sched.schedule(event.clone(), delay);
        event
    }

    /// The orchestrator's top-level `Run()`. Fails fast (recoverable) if the end
    /// condition or fabric are unset; otherwise fans out
    /// `GLOBAL_NETWORK_INIT` and one `NODE_INIT` per node, then drives the
    /// main loop until the queue drains or the end condition trips.
    pub fn run(&mut self) -> Result<(), SimError> {
        if self.end_condition.is_none() {
            return Err(SimError::EndConditionNotSet);
        }
        if self.global_network.is_none() {
            return Err(SimError::GlobalNetworkNotSet);
        }

        if let Some(state) = self.global_state.as_mut() {
            state.init(&mut self.hooks);
        }
        self.measurement.init();

        {
            let mut sched = self.sched();
            let init_net = Event::new(
                event_type::GLOBAL_NETWORK_INIT,
                Some(Destination::GlobalNetwork),
                EventPayload::None,
            );
            sched.schedule(init_net, 0.0);
        }

        let node_ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        {
            let mut sched = self.sched();
            for id in node_ids {
                let init_node = Event::new(
                    event_type::NODE_INIT,
                    Some(Destination::Node(id)),
                    EventPayload::None,
                );
                sched.schedule(init_node, 0.0);
            }
        }

        self.running = true;
        tracing::info!(simulation = %self.name, seed_count = self.nodes.len(), "simulation starting");

        while self.running {
            let progressed = self.step();
            let should_stop = !progressed
                || self
                    .end_condition
                    .as_ref()
                    .map(|c| c.check(self.now))
                    .unwrap_or(false);
            if should_stop {
                self.running = false;
            }
        }

        if let Some(state) = self.global_state.as_mut() {
            state.finish();
        }
        self.measurement.finish();

        tracing::info!(simulation = %self.name, now = self.now, "simulation finished");
        Ok(())
    }

    /// Pops the minimum queue item and dispatches it. Returns `false` only
    /// when the queue was empty. Aborted events are discarded without
    /// advancing the clock or firing hooks, per the scheduler's abort
    /// semantics.
    pub fn step(&mut self) -> bool {
        let Some(mut event) = self.queue.pop() else {
            return false;
        };

        if event.state == EventState::Aborted {
            return true;
        }

        self.now = event.time;
        event.time = self.now;
        self.measurement.record_event(event.event_type, self.now);

        {
            let mut sched = Sched::new(&mut self.queue, &self.hooks, &mut self.rng, self.now);
            let hooks = &self.hooks;
            hooks.fire_pre(&mut sched, &mut event);
        }

        let handled = self.dispatch(&mut event);
        event.state = if handled {
            EventState::Handled
        } else {
            EventState::NotHandled
        };

        {
            let mut sched = Sched::new(&mut self.queue, &self.hooks, &mut self.rng, self.now);
            let hooks = &self.hooks;
            hooks.fire_post(&mut sched, &mut event);
        }

        true
    }

    /// Resolves `event.destination` to its owning component and invokes
    /// the appropriate handler, holding disjoint borrows of `self`'s
    /// fields so the node map, the fabric, and the scheduling context can
    /// all be live at once without reference cycles.
    fn dispatch(&mut self, event: &mut Event) -> bool {
        match event.destination {
            Some(Destination::Node(id)) => {
                let Simulation {
                    nodes,
                    global_network,
                    queue,
                    hooks,
                    rng,
                    now,
                    ..
                } = self;
                let Some(node) = nodes.get_mut(&id) else {
                    tracing::debug!(node_id = id, "event destined to unknown node id, ignoring");
                    return false;
                };
                let mut sched = Sched::new(queue, hooks, rng, *now);
                node.handle_event(&mut sched, global_network.as_mut(), event)
            }
            Some(Destination::GlobalNetwork) => {
                let Simulation {
                    global_network,
                    queue,
                    hooks,
                    rng,
                    now,
                    ..
                } = self;
                let Some(fabric) = global_network.as_mut() else {
                    return false;
                };
                let mut sched = Sched::new(queue, hooks, rng, *now);
                match event.event_type {
                    event_type::GLOBAL_NETWORK_INIT => {
                        fabric.init();
                        true
                    }
                    event_type::GLOBAL_NETWORK_SEND_MESSAGE => match &event.payload {
                        EventPayload::Message(msg) => {
                            fabric.send_message(&mut sched, msg.clone());
                            true
                        }
                        _ => false,
                    },
                    _ => false,
                }
            }
            Some(Destination::GlobalState) => {
                let Simulation {
                    global_state,
                    hooks,
                    ..
                } = self;
                let Some(state) = global_state.as_mut() else {
                    return false;
                };
                match event.event_type {
                    event_type::NODE_INIT => {
                        state.init(hooks);
                        true
                    }
                    event_type::NODE_FINISH => {
                        state.finish();
                        true
                    }
                    _ => false,
                }
            }
            Some(Destination::Simulation) => match event.event_type {
                event_type::STOP => {
                    self.running = false;
                    true
                }
                _ => false,
            },
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::DefaultBehavior;
    use crate::node_network::DefaultNodeNetwork;
    use crate::sampler::Sampler;
    use p2psim_types::node_type::NodeType;

    fn bare_sim() -> Simulation {
        let mut sim = Simulation::new("test", 0);
        sim.set_global_network(GlobalNetwork::new(
            Sampler::Uniform { min: 0.0, max: 0.0 },
            Sampler::Uniform { min: 0.0, max: 0.0 },
        ));
        sim.set_end_condition(Box::new(crate::end_condition::TimeEndCondition::new(10.0)));
        sim
    }

    #[test]
    fn run_requires_end_condition_and_fabric() {
        let mut sim = Simulation::new("test", 0);
        assert!(matches!(sim.run(), Err(SimError::EndConditionNotSet)));

        sim.set_end_condition(Box::new(crate::end_condition::TimeEndCondition::new(1.0)));
        assert!(matches!(sim.run(), Err(SimError::GlobalNetworkNotSet)));
    }

    #[test]
    fn scenario_time_end_condition_with_no_nodes() {
        let mut sim = bare_sim();
        sim.run().expect("run should succeed");
        assert!(sim.now() >= 10.0);
        assert!(!sim.is_running());
    }

    #[test]
    fn scenario_deterministic_ordering() {
        let mut sim = bare_sim();
        let e1 = Event::new(100, Some(Destination::Simulation), EventPayload::None);
        let e2 = Event::new(101, Some(Destination::Simulation), EventPayload::None);
        let e3 = Event::new(102, Some(Destination::Simulation), EventPayload::None);
        sim.schedule(e1, 1.0);
        sim.schedule(e2, 1.0);
        sim.schedule(e3, 0.5);

        let mut order = Vec::new();
        while sim.now() < 1.0 {
            let before = sim.queue.len();
            if before == 0 {
                break;
            }
            if let Some(ev) = sim.queue.pop() {
                order.push(ev.event_type);
                sim.now = ev.time;
            }
        }
        assert_eq!(order, vec![102, 100, 101]);
    }

    #[test]
    fn abort_prevents_clock_advance_and_dispatch() {
        let mut sim = bare_sim();
        let event = Event::new(999, Some(Destination::Simulation), EventPayload::None);
        sim.schedule(event, 5.0);
        // Abort it before it is ever popped.
        let popped = sim.queue.pop().unwrap();
        let mut aborted = popped;
        aborted.abort();
        sim.queue = EventQueue::new();
        let seq = 0;
        let _ = seq;
        // Re-push the aborted event directly to exercise step()'s abort path.
        sim.queue.push(aborted, 5.0);
        let before = sim.now();
        let progressed = sim.step();
        assert!(progressed);
        assert_eq!(sim.now(), before, "clock must not advance past an aborted event");
    }

    #[test]
    fn add_node_assigns_one_based_ids_in_order() {
        let mut sim = bare_sim();
        let a = sim.add_node_with(
            NodeType::Full,
            Box::<DefaultNodeNetwork>::default(),
            Box::<DefaultBehavior>::default(),
            Vec::new(),
        );
        let b = sim.add_node_with(
            NodeType::Client,
            Box::<DefaultNodeNetwork>::default(),
            Box::<DefaultBehavior>::default(),
            Vec::new(),
        );
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn remove_unknown_node_is_recoverable() {
        let mut sim = bare_sim();
        assert!(matches!(sim.remove_node(42), Err(SimError::UnknownNodeId(42))));
    }

    #[test]
    fn step_on_empty_queue_returns_false_without_advancing_clock() {
        let mut sim = bare_sim();
        let before = sim.now();
        assert!(!sim.step());
        assert_eq!(sim.now(), before);
    }

    #[test]
    fn measurement_module_sees_every_dispatched_event() {
        use crate::measurement::MeasurementModule;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        #[derive(Clone)]
        struct CountingMeasurement(Arc<AtomicUsize>);
        impl MeasurementModule for CountingMeasurement {
            fn init(&mut self) {}
            fn finish(&mut self) {}
            fn record_event(&mut self, _event_type: u16, _sim_time: f64) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let count = Arc::new(AtomicUsize::new(0));
        let mut sim = bare_sim();
        sim.set_measurement_module(Box::new(CountingMeasurement(count.clone())));

        let event = Event::new(999, Some(Destination::Simulation), EventPayload::None);
        sim.schedule(event, 0.0);
        assert!(sim.step());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
