//! Unified error type exposed by **`stepfree-core`**.
//!
//! Provider crates convert their internal errors into one of these variants
//! before handing them to the pipeline, which only has to distinguish the
//! handful of failure classes a caller can act on.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StepFreeError>;

#[derive(Debug, Error)]
pub enum StepFreeError {
    /// A required setting (usually the API credential) is absent or unusable.
    /// Raised before any network attempt is made.
    #[error("{provider} is not configured: {reason}")]
    NotConfigured {
        provider: &'static str,
        reason: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The call succeeded at the transport level but the payload did not have
    /// the expected shape (e.g. no text content block).
    #[error("unexpected upstream response format: {0}")]
    Format(String),

    /// Connection, TLS or any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync + 'static>),
}
