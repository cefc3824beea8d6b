//! # p2psim-types::time
//!
//! Simulation time is a 64-bit floating point scalar measured in seconds,
//! matching the `"10.0"`-style numeric literals used throughout
//! configuration and the latency-sampler parameters. Ordering over
//! `SimTime` is total for the finite, non-NaN values the kernel ever
//! produces: inputs that would yield NaN or infinite time are rejected at
//! the API boundary (negative delays, malformed sampler parameters), so
//! comparisons never need to defend against NaN internally.

/// Simulation time, in seconds.
pub type SimTime = f64;

/// The start of simulation time.
pub const SIM_EPOCH: SimTime = 0.0;

/// Compares two simulation times assuming both are finite, matching the
/// totality guarantee the kernel relies on for queue ordering.
pub fn cmp_sim_time(a: SimTime, b: SimTime) -> std::cmp::Ordering {
    a.partial_cmp(&b)
        .expect("SimTime must be finite and non-NaN; this indicates a malformed delay or sample")
}
