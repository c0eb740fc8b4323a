//! Metric sampling and aggregation.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::warn;

use railscale_core::{MetricsReport, MetricsSample, ScaleBackend, Snapshot};

/// Fetches raw CPU samples for the trailing lookback window and
/// reduces them to one [`Snapshot`] per cycle.
pub struct MetricsProvider {
    lookback: Duration,
}

impl MetricsProvider {
    /// `lookback` is the window width, normally `2 × poll_interval`
    /// so a metrics source that lags by a bucket still has data for
    /// us.
    pub fn new(lookback: Duration) -> Self {
        Self { lookback }
    }

    /// Take one sample ending at `now`.
    ///
    /// Any backend failure is downgraded to a warning and a
    /// [`MetricsSample::Degraded`] result; a metrics blip must never
    /// take the control loop down with it.
    pub async fn sample(&self, backend: &dyn ScaleBackend, now: DateTime<Utc>) -> MetricsSample {
        let from = now - chrono::Duration::seconds(self.lookback.as_secs() as i64);
        match backend.fetch_metrics(from, now).await {
            Ok(report) => MetricsSample::Live(aggregate(&report)),
            Err(e) => {
                warn!(error = %e, "metrics fetch failed, using a degraded sample");
                MetricsSample::Degraded
            }
        }
    }
}

/// Unweighted mean over the flattened sample list.
///
/// Every sample counts once, so an instance that reported more
/// buckets weighs more than one that reported fewer. Known asymmetry,
/// kept as-is.
fn aggregate(report: &MetricsReport) -> Snapshot {
    let avg_cpu = if report.cpu_samples.is_empty() {
        0.0
    } else {
        report.cpu_samples.iter().sum::<f64>() / report.cpu_samples.len() as f64
    };
    Snapshot {
        avg_cpu,
        replicas: report.replicas,
    }
}
