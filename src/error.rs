//! Error types for the path-matching core
//!
//! Every failure here is a local construction-time failure surfaced
//! immediately to the caller; nothing is silently corrected and there is no
//! retry policy at this layer.

use thiserror::Error;

/// Main error type for waymatch operations
#[derive(Debug, Error)]
pub enum Error {
    /// EdgeLocation fraction outside the valid linear-reference range
    #[error("fraction {0} is outside [0.0, 1.0]")]
    FractionOutOfRange(f64),

    /// EdgeSubline endpoints reference two different edges
    #[error("subline endpoints reference different edges: {0} vs {1}")]
    EdgeMismatch(String, String),

    /// EdgeString append that breaks path contiguity
    #[error("element starting at {0} is not contiguous with path ending at {1}")]
    NonContiguous(String, String),

    /// A location passed to a mapping does not lie on the registered path
    #[error("location {0} does not lie on the path")]
    LocationNotOnPath(String),
}

/// Convenience result type for waymatch operations
pub type Result<T> = std::result::Result<T, Error>;
