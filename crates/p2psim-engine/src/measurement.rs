//! # p2psim-engine::measurement
//!
//! The measurement-module registry role, one of the kernel's pluggable roles.
//! The core ships a default that forwards dispatched event counts into
//! the process-wide `metrics` registry (the same crate the rest of the
//! corpus reaches for instrumentation), keyed by the event's well-known
//! name where one exists and by its raw numeric type otherwise — the
//! 30001-65535 user-plugin range is open-ended and cannot be enumerated
//! by the kernel.

use crate::registry::Registry;
use p2psim_types::{event_type, time::SimTime};

pub trait MeasurementModule: Send + Sync {
    fn init(&mut self);
    fn finish(&mut self);
    fn record_event(&mut self, event_type: u16, sim_time: SimTime);
}

#[derive(Debug, Default)]
pub struct DefaultMeasurementModule {
    initialized: bool,
}

impl MeasurementModule for DefaultMeasurementModule {
    fn init(&mut self) {
        self.initialized = true;
    }

    fn finish(&mut self) {
        self.initialized = false;
    }

    fn record_event(&mut self, event_type: u16, sim_time: SimTime) {
        let label = event_type::name(event_type).unwrap_or("user_plugin");
        metrics::counter!("p2psim_events_dispatched_total", "event_type" => label).increment(1);
        let _ = sim_time;
    }
}

pub static MEASUREMENT_REGISTRY: Registry<dyn MeasurementModule> = Registry::new("measurement_module");

pub fn register_defaults() {
    let _ = MEASUREMENT_REGISTRY.register("default_measurements", || {
        Box::<DefaultMeasurementModule>::default()
    });
}
