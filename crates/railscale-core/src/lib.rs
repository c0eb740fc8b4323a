//! railscale-core — shared types for the railscale autoscaler.
//!
//! Defines the scaling policy (thresholds, replica band, cooldown,
//! poll interval), the per-cycle metric snapshot types, and the
//! [`ScaleBackend`] contract the control loop drives. The concrete
//! backend (Railway's GraphQL API) lives in `railscale-railway`; the
//! control loop in `railscale-scaler` only ever sees this trait.

pub mod backend;
pub mod error;
pub mod policy;
pub mod types;

pub use backend::{MetricsReport, ScaleBackend};
pub use error::PolicyError;
pub use policy::{ScalePolicy, parse_duration};
pub use types::{MetricsSample, Snapshot};
