//! The control loop scheduler.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use railscale_core::{ScaleBackend, ScalePolicy};

use crate::actuator::{Actuator, ScaleOutcome};
use crate::decision::decide;
use crate::provider::MetricsProvider;

/// One closed loop for one target service: sample → decide → maybe
/// apply → sleep, forever.
///
/// Single task, strictly sequential; the sleep is a full pause
/// between cycles, so two cycles never overlap and at most one
/// mutation is in flight at any time.
pub struct ControlLoop<B> {
    backend: B,
    policy: ScalePolicy,
    provider: MetricsProvider,
    actuator: Actuator,
}

impl<B: ScaleBackend> ControlLoop<B> {
    /// Build a loop for a validated policy.
    pub fn new(backend: B, policy: ScalePolicy) -> Self {
        let provider = MetricsProvider::new(policy.lookback());
        let actuator = Actuator::new(policy.cooldown);
        Self {
            backend,
            policy,
            provider,
            actuator,
        }
    }

    /// Run one cycle and report what the actuator did.
    pub async fn tick(&mut self) -> ScaleOutcome {
        let sample = self.provider.sample(&self.backend, Utc::now()).await;
        let snapshot = sample.snapshot();
        let desired = decide(snapshot.avg_cpu, snapshot.replicas, &self.policy);

        debug!(
            avg_cpu = snapshot.avg_cpu,
            replicas = snapshot.replicas,
            desired,
            degraded = sample.is_degraded(),
            "cycle evaluated"
        );

        self.actuator
            .maybe_apply(&self.backend, desired, snapshot.replicas, Instant::now())
            .await
    }

    /// Run until the shutdown signal flips.
    ///
    /// The signal is observed both between cycles and during the
    /// inter-cycle sleep, so shutdown is prompt. A cycle in progress
    /// completes; nothing is rolled back.
    pub async fn run(mut self, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        info!(
            interval_secs = self.policy.poll_interval.as_secs(),
            cooldown_secs = self.policy.cooldown.as_secs(),
            "autoscaler started"
        );

        loop {
            if *shutdown.borrow() {
                info!("autoscaler shutting down");
                break;
            }

            self.tick().await;

            tokio::select! {
                _ = tokio::time::sleep(self.policy.poll_interval) => {}
                _ = shutdown.changed() => {
                    info!("autoscaler shutting down");
                    break;
                }
            }
        }
    }
}
