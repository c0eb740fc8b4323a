//! Per-cycle observation types.

use serde::{Deserialize, Serialize};

/// One aggregated observation of the target service: mean CPU across
/// every reported sample, paired with the currently reported replica
/// count. Valid only for the cycle that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Mean CPU utilization in percent. Expected 0–100 but not
    /// clamped; the remote may report bursts above 100.
    pub avg_cpu: f64,
    /// Replica count the platform currently reports for the service.
    pub replicas: u32,
}

impl Snapshot {
    pub const ZERO: Snapshot = Snapshot {
        avg_cpu: 0.0,
        replicas: 0,
    };
}

/// Result of one sampling attempt.
///
/// A fetch failure never crashes the loop; it yields `Degraded`,
/// which reads as the zero snapshot downstream. Keeping the two cases
/// distinct lets callers (and tests) tell "the service is idle" apart
/// from "the metrics source was unreachable".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricsSample {
    /// The fetch succeeded and produced this snapshot.
    Live(Snapshot),
    /// The fetch failed; treat the cycle as zero load, zero replicas.
    Degraded,
}

impl MetricsSample {
    /// The snapshot to feed into the decision function.
    ///
    /// `Degraded` maps to the zero snapshot, which is safe by
    /// construction: 0% CPU never triggers a scale-up, and 0 replicas
    /// never sits above a positive `min_replicas`, so no scale-down
    /// fires either.
    pub fn snapshot(&self) -> Snapshot {
        match self {
            MetricsSample::Live(s) => *s,
            MetricsSample::Degraded => Snapshot::ZERO,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, MetricsSample::Degraded)
    }
}
