//! Error types for the tally engine.

use thiserror::Error;

const NOT_FOUND_PREFIX: &str = "document not found: ";

/// All possible errors from the tally engine.
///
/// Every failure is one of two kinds: the caller's input was rejected before
/// the store was touched, or a store call failed (possibly after earlier
/// calls of the same operation already succeeded).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caller-supplied input failed a precondition. No store call was made.
    #[error("{message}")]
    Validation { message: String },

    /// A store adapter call failed. Prior steps are not rolled back.
    #[error("store error: {message}")]
    Store { message: String },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Error::Store {
            message: message.into(),
        }
    }

    /// A store error for a key that does not exist.
    pub fn not_found(key: &str) -> Self {
        Self::store(format!("{NOT_FOUND_PREFIX}{key}"))
    }

    /// Check if this is the store's answer for a missing key.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Store { message } => message.starts_with(NOT_FOUND_PREFIX),
            Error::Validation { .. } => false,
        }
    }

    /// The bare message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Validation { message } | Error::Store { message } => message,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Error::Store { .. })
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
