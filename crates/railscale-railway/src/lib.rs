//! railscale-railway — the Railway backend.
//!
//! Implements [`railscale_core::ScaleBackend`] against Railway's
//! public GraphQL API (`backboard.railway.com/graphql/v2`): one query
//! for per-instance CPU metrics plus the current replica count, one
//! mutation to change the replica count. Authenticated with a
//! project access token sent on every request.

pub mod client;
pub mod error;

pub use client::{DEFAULT_ENDPOINT, RailwayClient};
pub use error::RailwayError;
