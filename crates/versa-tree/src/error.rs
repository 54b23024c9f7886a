//! Error types for the tree engine.

use thiserror::Error;

use versa_common::types::Key;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors that can occur in tree operations.
///
/// None of these are fatal: a missing key is reported and the operation is
/// a structural no-op, and structure errors only surface from the explicit
/// validation entry point used in tests.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Key not found in the tree.
    #[error("key {key} not found")]
    KeyNotFound {
        /// The key that was looked up.
        key: Key,
    },

    /// Tree structure violates a red-black or ordering invariant.
    #[error("tree structure error: {0}")]
    Structure(String),
}
