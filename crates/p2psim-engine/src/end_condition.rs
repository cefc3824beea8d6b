//! # p2psim-engine::end_condition
//!
//! Polled once per main-loop iteration to decide whether the
//! run should stop. The only built-in is the time limit; anything else is
//! a configuration-selected plug-in registered under its own name.

use crate::errors::SimError;
use crate::registry::ArgRegistry;
use p2psim_types::time::SimTime;

pub trait EndCondition: Send + Sync {
    fn check(&self, now: SimTime) -> bool;
}

#[derive(Debug, Clone, Copy)]
pub struct TimeEndCondition {
    end_time: SimTime,
}

impl TimeEndCondition {
    pub fn new(end_time: SimTime) -> Self {
        Self { end_time }
    }
}

impl EndCondition for TimeEndCondition {
    fn check(&self, now: SimTime) -> bool {
        now >= self.end_time
    }
}

pub static END_CONDITION_REGISTRY: ArgRegistry<dyn EndCondition> = ArgRegistry::new("end_condition");

pub fn register_defaults() {
    let _ = END_CONDITION_REGISTRY.register("time", |arg: &str| {
        let end_time: SimTime = arg.parse().map_err(|source| SimError::EndConditionArg {
            name: "time",
            arg: arg.to_string(),
            source,
        })?;
        Ok(Box::new(TimeEndCondition::new(end_time)) as Box<dyn EndCondition>)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_end_condition_fires_at_or_after_end_time() {
        let cond = TimeEndCondition::new(10.0);
        assert!(!cond.check(9.999));
        assert!(cond.check(10.0));
        assert!(cond.check(10.1));
    }

    #[test]
    fn bad_argument_is_rejected() {
        register_defaults();
        assert!(END_CONDITION_REGISTRY.create("time", "not-a-number").is_err());
    }
}
