//! Error types for policy construction and validation.

use thiserror::Error;

/// Errors raised while building or validating a [`crate::ScalePolicy`].
///
/// All of these are startup-time errors. The control loop never runs
/// with an invalid policy, so none of them appear on the per-cycle
/// error path.
#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("low threshold ({low}) must be below high threshold ({high})")]
    ThresholdOrder { low: f64, high: f64 },

    #[error("min replicas must be at least 1, got {0}")]
    ZeroMinReplicas(u32),

    #[error("min replicas ({min}) must not exceed max replicas ({max})")]
    ReplicaBand { min: u32, max: u32 },

    #[error("invalid duration {input:?}: {reason}")]
    Duration { input: String, reason: String },
}
