//! Scaling policy — the immutable per-process configuration record.
//!
//! Constructed once at startup, validated before the control loop
//! begins, and read-only thereafter. The daemon resolves values from
//! the environment; this module only owns the invariants.

use std::time::Duration;

use crate::error::PolicyError;

/// Hysteresis thresholds, replica band, and timing for one target
/// service.
///
/// Invariants (enforced by [`ScalePolicy::validate`]):
/// - `low_threshold < high_threshold`
/// - `1 <= min_replicas <= max_replicas`
#[derive(Debug, Clone, PartialEq)]
pub struct ScalePolicy {
    /// Scale up when average CPU exceeds this percentage.
    pub high_threshold: f64,
    /// Scale down when average CPU falls below this percentage.
    pub low_threshold: f64,
    /// Floor of the replica band.
    pub min_replicas: u32,
    /// Ceiling of the replica band.
    pub max_replicas: u32,
    /// Minimum time between two successful scaling actions.
    pub cooldown: Duration,
    /// Time between sampling cycles; also sets the metric lookback
    /// window (`2 × poll_interval`).
    pub poll_interval: Duration,
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self {
            high_threshold: 75.0,
            low_threshold: 30.0,
            min_replicas: 1,
            max_replicas: 5,
            cooldown: Duration::from_secs(120),
            poll_interval: Duration::from_secs(30),
        }
    }
}

impl ScalePolicy {
    /// Check the policy invariants.
    ///
    /// Called once at startup; a failure here is fatal.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.low_threshold >= self.high_threshold {
            return Err(PolicyError::ThresholdOrder {
                low: self.low_threshold,
                high: self.high_threshold,
            });
        }
        if self.min_replicas == 0 {
            return Err(PolicyError::ZeroMinReplicas(self.min_replicas));
        }
        if self.min_replicas > self.max_replicas {
            return Err(PolicyError::ReplicaBand {
                min: self.min_replicas,
                max: self.max_replicas,
            });
        }
        Ok(())
    }

    /// Lookback window for metric aggregation.
    ///
    /// Twice the poll interval, so a lagging metrics source that has
    /// not yet published the newest bucket still yields samples.
    pub fn lookback(&self) -> Duration {
        self.poll_interval * 2
    }
}

/// Parse a human duration like `"30s"`, `"5m"`, `"1h"`, or a bare
/// number of seconds.
///
/// Unlike lenient parsers that substitute a default, a malformed
/// value is an error: durations only come from configuration, and
/// configuration errors are fatal at startup.
pub fn parse_duration(s: &str) -> Result<Duration, PolicyError> {
    let s = s.trim();
    let err = |reason: &str| PolicyError::Duration {
        input: s.to_string(),
        reason: reason.to_string(),
    };

    let (digits, unit) = match s.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((i, _)) => s.split_at(i),
        None => (s, ""),
    };
    if digits.is_empty() {
        return Err(err("expected a leading number"));
    }
    let n: u64 = digits.parse().map_err(|_| err("number out of range"))?;

    let secs = match unit {
        "" | "s" => n,
        "m" => n * 60,
        "h" => n * 3600,
        _ => return Err(err("unknown unit, expected s, m, or h")),
    };
    Ok(Duration::from_secs(secs))
}
