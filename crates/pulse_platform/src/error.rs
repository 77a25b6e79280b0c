//! Surface error types

use thiserror::Error;

/// Surface-related errors
///
/// None of these are fatal to the page: components that hit a missing
/// target or an absent capability degrade to a no-op or a fallback path.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// A referenced node is absent from the document
    #[error("Missing target: {0}")]
    MissingTarget(String),

    /// A required capability is unavailable on this host
    #[error("Capability unavailable: {0}")]
    Unsupported(String),

    /// Numeric content could not be parsed from a node
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Generic surface error
    #[error("Surface error: {0}")]
    Other(String),
}

/// Result type for surface operations
pub type Result<T> = std::result::Result<T, SurfaceError>;
