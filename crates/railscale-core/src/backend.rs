//! The contract between the control loop and the remote platform.
//!
//! The loop needs exactly two operations: read the raw CPU samples
//! for a time window, and set the replica count. Transport, query
//! language, and authentication are the implementor's concern
//! (`railscale-railway` speaks Railway's GraphQL API; tests use an
//! in-memory mock).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw result of one metrics fetch, before aggregation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Every CPU sample from every instance in the window, flattened.
    /// Instances that reported more samples contribute more entries.
    pub cpu_samples: Vec<f64>,
    /// Replica count the platform reports right now.
    pub replicas: u32,
}

/// Remote operations the autoscaler drives.
///
/// The target service identifier and credential are captured when the
/// backend is constructed, once at startup. Both calls are bounded by
/// the implementor's network timeout and are safe to reissue — the
/// loop never retries inside a cycle, it simply revisits the decision
/// on the next one.
#[async_trait]
pub trait ScaleBackend: Send + Sync {
    /// Fetch per-instance CPU samples over `[from, to]` plus the
    /// current replica count.
    async fn fetch_metrics(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<MetricsReport>;

    /// Set the service's replica count to `desired`.
    async fn apply_replicas(&self, desired: u32) -> anyhow::Result<()>;
}
