//! Error types for the schemaclip core.
//!
//! The retry executor never rewrites an operation's failure: the typed entry
//! points return the operation's own error type unchanged. [`RetryError`] is
//! only used by the entry points that accept an optional operation, where a
//! missing operation has to be reported separately from anything the
//! operation itself could fail with.

use thiserror::Error;

/// Error returned by the optional-operation entry points of the executor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RetryError<E> {
    /// A required argument was missing. Raised before any attempt is made.
    #[error("invalid argument: {0} is required")]
    InvalidArgument(&'static str),

    /// The operation failed; the failure is carried unchanged.
    #[error(transparent)]
    Operation(E),
}

impl<E> RetryError<E> {
    /// Whether this is a contract violation rather than an operation failure.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Borrow the operation's failure, if that is what this is.
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            Self::Operation(err) => Some(err),
            Self::InvalidArgument(_) => None,
        }
    }

    /// Recover the operation's failure, if that is what this is.
    pub fn into_operation_error(self) -> Option<E> {
        match self {
            Self::Operation(err) => Some(err),
            Self::InvalidArgument(_) => None,
        }
    }
}

/// Errors raised while loading a [`RetryConfig`](crate::config::RetryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML parsing failed.
    #[error("invalid TOML retry config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing failed.
    #[error("invalid JSON retry config: {0}")]
    Json(#[from] serde_json::Error),

    /// An environment value was not a list of integers.
    #[error("invalid value for {var}: {value:?}")]
    InvalidNumber {
        /// Variable that held the value
        var: &'static str,
        /// The offending entry
        value: String,
    },

    /// The schedule contained a non-positive wait.
    #[error("schedule entry {index} must be a positive number of milliseconds")]
    InvalidSchedule {
        /// Zero-based position of the offending entry
        index: usize,
    },

    /// An exponential backoff parameter was out of range.
    #[error("invalid backoff {field}: {reason}")]
    InvalidBackoff {
        /// Parameter name
        field: &'static str,
        /// What the parameter must satisfy
        reason: &'static str,
    },
}
