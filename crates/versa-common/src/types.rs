//! Core newtypes for VersaTree.
//!
//! These types provide type-safe wrappers around the scalar values the
//! engine traffics in, preventing accidental misuse of keys as versions
//! and vice versa.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A key stored in the tree.
///
/// Keys are totally ordered scalars. Whether a key lies inside the valid
/// domain is decided by the tree configuration, not by this type; a `Key`
/// can hold any `i64`.
///
/// # Example
///
/// ```rust
/// use versa_common::types::Key;
///
/// let key = Key::new(42);
/// assert_eq!(key.as_i64(), 42);
/// assert!(key < Key::MAX);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Key(i64);

impl Key {
    /// The largest representable key, reported by successor queries that
    /// find no key greater than the probe.
    pub const MAX: Self = Self(i64::MAX);

    /// Creates a new `Key` from a raw i64 value.
    #[inline]
    #[must_use]
    pub const fn new(key: i64) -> Self {
        Self(key)
    }

    /// Returns the raw i64 value.
    #[inline]
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Key {
    #[inline]
    fn from(key: i64) -> Self {
        Self::new(key)
    }
}

impl From<Key> for i64 {
    #[inline]
    fn from(key: Key) -> Self {
        key.0
    }
}

/// A version number identifying one historical state of the tree.
///
/// Versions start at zero and increase by exactly one on every mutating
/// call; they are never decremented and never reused.
///
/// # Example
///
/// ```rust
/// use versa_common::types::Version;
///
/// let v = Version::ZERO;
/// assert_eq!(v.next().as_u64(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Version(u64);

impl Version {
    /// The initial version of a freshly constructed, empty tree.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Version` from a raw u64 value.
    #[inline]
    #[must_use]
    pub const fn new(version: u64) -> Self {
        Self(version)
    }

    /// Returns the raw u64 value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the next version.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns how many steps back `other` lies from this version.
    ///
    /// Saturates at zero when `other` is not older than `self`.
    #[inline]
    #[must_use]
    pub const fn steps_back_to(self, other: Self) -> u64 {
        self.0.saturating_sub(other.0)
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({})", self.0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u64> for Version {
    #[inline]
    fn from(version: u64) -> Self {
        Self::new(version)
    }
}

impl From<Version> for u64 {
    #[inline]
    fn from(version: Version) -> Self {
        version.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key() {
        let key = Key::new(42);
        assert_eq!(key.as_i64(), 42);
        assert_eq!(key.to_string(), "42");
        assert_eq!(Key::from(42i64), key);
        assert_eq!(i64::from(key), 42);
    }

    #[test]
    fn test_key_ordering() {
        assert!(Key::new(1) < Key::new(2));
        assert!(Key::new(-1) < Key::new(0));
        assert!(Key::new(5) < Key::MAX);
    }

    #[test]
    fn test_version() {
        let v = Version::new(3);
        assert_eq!(v.as_u64(), 3);
        assert_eq!(v.next().as_u64(), 4);
        assert_eq!(v.to_string(), "v3");
    }

    #[test]
    fn test_version_steps_back() {
        let newer = Version::new(7);
        let older = Version::new(4);
        assert_eq!(newer.steps_back_to(older), 3);
        assert_eq!(older.steps_back_to(newer), 0);
    }

    #[test]
    fn test_version_monotone() {
        let mut v = Version::ZERO;
        for expected in 1..=5 {
            v = v.next();
            assert_eq!(v.as_u64(), expected);
        }
    }
}
