//! # versa-common
//!
//! Common types, errors, and constants for VersaTree.
//!
//! This crate provides the foundational types used across all VersaTree
//! components. It includes:
//!
//! - **Types**: Core newtypes (`Key`, `Version`)
//! - **Errors**: Unified error handling with `VersaError`
//! - **Constants**: The shared key domain bounds
//!
//! ## Example
//!
//! ```rust
//! use versa_common::types::{Key, Version};
//!
//! let key = Key::new(42);
//! let version = Version::ZERO.next();
//! assert_eq!(key.as_i64(), 42);
//! assert_eq!(version.as_u64(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{VersaError, VersaResult};
pub use types::{Key, Version};
