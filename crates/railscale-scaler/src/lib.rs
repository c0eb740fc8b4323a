//! railscale-scaler — the closed control loop.
//!
//! One long-lived task per target service: sample CPU, decide, maybe
//! scale, sleep. Strictly sequential; cycles never overlap.
//!
//! # Scaling algorithm
//!
//! ```text
//! avg_cpu = mean of every CPU sample from every instance
//!           over the trailing 2 × poll_interval window
//!
//! if avg_cpu > high and replicas < max:   replicas + 1
//! if avg_cpu < low  and replicas > min:   replicas - 1
//! otherwise:                              no change
//! ```
//!
//! Two thresholds with a deadband between them (hysteresis) stop the
//! controller from flapping around a single threshold; the cooldown
//! stops it from ratcheting a step every cycle. A failed metrics
//! fetch degrades to a zero snapshot instead of crashing the loop —
//! zero CPU never scales up and zero replicas never scales down, so a
//! metrics outage holds capacity where it is.

pub mod actuator;
pub mod control;
pub mod decision;
pub mod provider;

pub use actuator::{Actuator, ScaleOutcome};
pub use control::ControlLoop;
pub use decision::decide;
pub use provider::MetricsProvider;

#[cfg(test)]
pub(crate) mod testutil;
