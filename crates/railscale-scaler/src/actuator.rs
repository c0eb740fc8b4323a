//! Cooldown-gated actuation.
//!
//! Owns the single piece of state that survives across cycles: the
//! time of the last successful scale action. The timestamp lives here
//! as an ordinary field rather than process-global state, so the gate
//! is unit-testable and a future multi-service daemon can run one
//! actuator per target.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use railscale_core::ScaleBackend;

/// What one actuation attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleOutcome {
    /// Desired matched current; nothing to do.
    NoChange,
    /// A change was wanted but the cooldown has not elapsed.
    Cooldown { remaining: Duration },
    /// The remote mutation succeeded.
    Applied { from: u32, to: u32 },
    /// The remote mutation failed; the cooldown clock was not touched.
    Failed,
}

/// Applies scaling decisions, at most one remote mutation per cycle,
/// no sooner than `cooldown` after the previous successful one.
pub struct Actuator {
    cooldown: Duration,
    /// Instant of the last successful scale. `None` until the first
    /// success, so a fresh process is immediately eligible. Restarting
    /// therefore forgets an in-flight cooldown — accepted, since no
    /// state persists across restarts.
    last_scale: Option<Instant>,
}

impl Actuator {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_scale: None,
        }
    }

    /// Time of the last successful scale action, if any.
    pub fn last_scale(&self) -> Option<Instant> {
        self.last_scale
    }

    /// Apply `desired` if it differs from `current` and the cooldown
    /// allows it.
    ///
    /// A failed mutation leaves `last_scale` untouched: failures do
    /// not consume cooldown, so the next eligible cycle retries
    /// without an artificial delay.
    pub async fn maybe_apply(
        &mut self,
        backend: &dyn ScaleBackend,
        desired: u32,
        current: u32,
        now: Instant,
    ) -> ScaleOutcome {
        if desired == current {
            return ScaleOutcome::NoChange;
        }

        if let Some(last) = self.last_scale {
            let elapsed = now.saturating_duration_since(last);
            if elapsed <= self.cooldown {
                let remaining = self.cooldown - elapsed;
                debug!(
                    from = current,
                    to = desired,
                    remaining_secs = remaining.as_secs(),
                    "scale suppressed by cooldown"
                );
                return ScaleOutcome::Cooldown { remaining };
            }
        }

        match backend.apply_replicas(desired).await {
            Ok(()) => {
                self.last_scale = Some(now);
                info!(from = current, to = desired, "replica count changed");
                ScaleOutcome::Applied {
                    from: current,
                    to: desired,
                }
            }
            Err(e) => {
                warn!(error = %e, desired, "scale action failed");
                ScaleOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockBackend;

    const COOLDOWN: Duration = Duration::from_secs(120);

    #[tokio::test]
    async fn equal_desired_and_current_skips_the_remote_call() {
        let backend = MockBackend::default();
        let mut actuator = Actuator::new(COOLDOWN);

        let outcome = actuator
            .maybe_apply(&backend, 3, 3, Instant::now())
            .await;

        assert_eq!(outcome, ScaleOutcome::NoChange);
        assert!(backend.applied().is_empty());
        assert_eq!(actuator.last_scale(), None);
    }

    #[tokio::test]
    async fn first_change_is_eligible_immediately() {
        let backend = MockBackend::default();
        let mut actuator = Actuator::new(COOLDOWN);
        let t0 = Instant::now();

        let outcome = actuator.maybe_apply(&backend, 3, 2, t0).await;

        assert_eq!(outcome, ScaleOutcome::Applied { from: 2, to: 3 });
        assert_eq!(backend.applied(), vec![3]);
        assert_eq!(actuator.last_scale(), Some(t0));
    }

    #[tokio::test]
    async fn change_inside_cooldown_is_suppressed() {
        let backend = MockBackend::default();
        let mut actuator = Actuator::new(COOLDOWN);
        let t0 = Instant::now();

        actuator.maybe_apply(&backend, 3, 2, t0).await;

        let outcome = actuator
            .maybe_apply(&backend, 4, 3, t0 + COOLDOWN - Duration::from_secs(1))
            .await;

        assert!(matches!(outcome, ScaleOutcome::Cooldown { .. }));
        // Only the first mutation went out; the timestamp is retained.
        assert_eq!(backend.applied(), vec![3]);
        assert_eq!(actuator.last_scale(), Some(t0));
    }

    #[tokio::test]
    async fn change_after_cooldown_goes_through() {
        let backend = MockBackend::default();
        let mut actuator = Actuator::new(COOLDOWN);
        let t0 = Instant::now();

        actuator.maybe_apply(&backend, 3, 2, t0).await;

        let t1 = t0 + COOLDOWN + Duration::from_secs(1);
        let outcome = actuator.maybe_apply(&backend, 4, 3, t1).await;

        assert_eq!(outcome, ScaleOutcome::Applied { from: 3, to: 4 });
        assert_eq!(backend.applied(), vec![3, 4]);
        assert_eq!(actuator.last_scale(), Some(t1));
    }

    #[tokio::test]
    async fn exactly_at_cooldown_is_still_suppressed() {
        let backend = MockBackend::default();
        let mut actuator = Actuator::new(COOLDOWN);
        let t0 = Instant::now();

        actuator.maybe_apply(&backend, 3, 2, t0).await;

        let outcome = actuator.maybe_apply(&backend, 4, 3, t0 + COOLDOWN).await;
        assert!(matches!(outcome, ScaleOutcome::Cooldown { .. }));
    }

    #[tokio::test]
    async fn failed_mutation_does_not_consume_cooldown() {
        let backend = MockBackend::default();
        let mut actuator = Actuator::new(COOLDOWN);
        let t0 = Instant::now();

        actuator.maybe_apply(&backend, 3, 2, t0).await;

        backend.fail_apply(true);
        let t1 = t0 + COOLDOWN + Duration::from_secs(5);
        let outcome = actuator.maybe_apply(&backend, 4, 3, t1).await;

        assert_eq!(outcome, ScaleOutcome::Failed);
        assert_eq!(actuator.last_scale(), Some(t0));

        // Next cycle is still eligible and succeeds.
        backend.fail_apply(false);
        let t2 = t1 + Duration::from_secs(30);
        let outcome = actuator.maybe_apply(&backend, 4, 3, t2).await;
        assert_eq!(outcome, ScaleOutcome::Applied { from: 3, to: 4 });
        assert_eq!(actuator.last_scale(), Some(t2));
    }

    #[tokio::test]
    async fn failed_first_mutation_leaves_the_actuator_fresh() {
        let backend = MockBackend::default();
        backend.fail_apply(true);
        let mut actuator = Actuator::new(COOLDOWN);

        let outcome = actuator
            .maybe_apply(&backend, 3, 2, Instant::now())
            .await;

        assert_eq!(outcome, ScaleOutcome::Failed);
        assert_eq!(actuator.last_scale(), None);
    }
}
