//! Error types for the PERMIT crates.
//!
//! The evaluator operations themselves are total and never fail. Errors only
//! arise at the edges: parsing capability names, loading configuration, and
//! pairing request identifiers with result codes.

use thiserror::Error;

/// The unified error type for the PERMIT crates.
#[derive(Debug, Error)]
pub enum PermitError {
    /// A capability name did not resolve to any known capability.
    #[error("unknown capability '{name}'")]
    UnknownCapability { name: String },

    /// A caller-supplied argument is structurally invalid.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A catalog or host fixture is missing, malformed, or violates an invariant.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the PERMIT crates.
pub type PermitResult<T> = Result<T, PermitError>;
