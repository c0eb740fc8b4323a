//! In-memory [`ScaleBackend`] for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use railscale_core::{MetricsReport, ScaleBackend};

/// Records every call and can be told to fail either operation.
#[derive(Default)]
pub(crate) struct MockBackend {
    report: Mutex<MetricsReport>,
    fail_fetch: AtomicBool,
    fail_apply: AtomicBool,
    applied: Mutex<Vec<u32>>,
    windows: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl MockBackend {
    pub fn with_report(report: MetricsReport) -> Self {
        Self {
            report: Mutex::new(report),
            ..Self::default()
        }
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::Relaxed);
    }

    pub fn fail_apply(&self, fail: bool) {
        self.fail_apply.store(fail, Ordering::Relaxed);
    }

    /// Replica counts sent to `apply_replicas`, in order.
    pub fn applied(&self) -> Vec<u32> {
        self.applied.lock().unwrap().clone()
    }

    /// `(from, to)` windows requested from `fetch_metrics`.
    pub fn windows(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.windows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScaleBackend for MockBackend {
    async fn fetch_metrics(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<MetricsReport> {
        self.windows.lock().unwrap().push((from, to));
        if self.fail_fetch.load(Ordering::Relaxed) {
            anyhow::bail!("mock fetch failure");
        }
        Ok(self.report.lock().unwrap().clone())
    }

    async fn apply_replicas(&self, desired: u32) -> anyhow::Result<()> {
        if self.fail_apply.load(Ordering::Relaxed) {
            anyhow::bail!("mock apply failure");
        }
        self.applied.lock().unwrap().push(desired);
        Ok(())
    }
}
