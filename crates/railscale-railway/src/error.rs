//! Error types for the Railway backend.

use thiserror::Error;

/// Errors that can occur talking to the Railway API.
///
/// All of these are transient from the control loop's point of view:
/// a fetch error degrades the cycle's sample, an apply error skips
/// the mutation, and the loop carries on either way.
#[derive(Debug, Error)]
pub enum RailwayError {
    /// Transport failure: connect, timeout, non-success status, or an
    /// undecodable body.
    #[error("railway request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a GraphQL-level `errors` array.
    #[error("railway api error: {0}")]
    Api(String),

    /// A 200 response with neither `data` nor `errors`.
    #[error("railway response carried no data")]
    MissingData,
}
