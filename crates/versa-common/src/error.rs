//! Error handling for VersaTree.
//!
//! This module provides the shared error type used by components outside
//! the tree engine itself; the engine carries its own, narrower error enum.

use thiserror::Error;

/// Result type alias for VersaTree operations.
pub type VersaResult<T> = std::result::Result<T, VersaError>;

/// The shared error type for VersaTree components.
#[derive(Debug, Error)]
pub enum VersaError {
    /// Invalid argument provided.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Error message.
        message: String,
    },

    /// I/O error from the underlying system.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl VersaError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VersaError::invalid_argument("bad key");
        assert_eq!(err.to_string(), "invalid argument: bad key");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VersaError = io_err.into();
        assert!(matches!(err, VersaError::Io { .. }));
    }
}
