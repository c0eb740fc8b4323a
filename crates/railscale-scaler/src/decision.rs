//! The hysteresis decision function.

use railscale_core::ScalePolicy;

/// Map an observed utilization and replica count to a desired replica
/// count.
///
/// Pure and total: no I/O, no state, defined for every input. Moves
/// by at most one replica per call and never leaves the policy's
/// `[min_replicas, max_replicas]` band from inside it. Between the
/// two thresholds (the deadband) it returns the input unchanged.
///
/// The arms are mutually exclusive because a valid policy has
/// `low_threshold < high_threshold`.
pub fn decide(utilization: f64, current: u32, policy: &ScalePolicy) -> u32 {
    if utilization > policy.high_threshold && current < policy.max_replicas {
        current + 1
    } else if utilization < policy.low_threshold && current > policy.min_replicas {
        current - 1
    } else {
        current
    }
}
