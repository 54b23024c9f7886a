//! Configuration for the tree engine.

use versa_common::constants::{KEY_DOMAIN_MAX, KEY_DOMAIN_MIN};
use versa_common::types::Key;

/// Configuration for a tree instance.
///
/// The only tunable is the valid key domain: an open interval outside of
/// which nodes are treated as dead ends by every read path. The default
/// bounds are inherited from the system this engine replaces.
#[derive(Debug, Clone, Copy)]
pub struct TreeConfig {
    /// Exclusive lower bound of the valid key domain.
    pub key_min: Key,

    /// Exclusive upper bound of the valid key domain.
    pub key_max: Key,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            key_min: Key::new(KEY_DOMAIN_MIN),
            key_max: Key::new(KEY_DOMAIN_MAX),
        }
    }
}

impl TreeConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the valid key domain to the open interval `(min, max)`.
    pub fn with_key_domain(mut self, min: Key, max: Key) -> Self {
        self.key_min = min;
        self.key_max = max;
        self
    }

    /// A configuration with a small key domain, convenient for exercising
    /// domain-validity dead ends in tests.
    pub fn for_testing() -> Self {
        Self::new().with_key_domain(Key::new(0), Key::new(1_000))
    }

    /// Returns true if `key` lies strictly inside the valid domain.
    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        self.key_min < key && key < self.key_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_domain() {
        let config = TreeConfig::default();
        assert!(config.contains(Key::new(1)));
        assert!(config.contains(Key::new(38_484_703)));
        assert!(!config.contains(Key::new(0)));
        assert!(!config.contains(Key::new(38_484_704)));
        assert!(!config.contains(Key::new(-5)));
    }

    #[test]
    fn test_custom_domain() {
        let config = TreeConfig::new().with_key_domain(Key::new(10), Key::new(20));
        assert!(config.contains(Key::new(15)));
        assert!(!config.contains(Key::new(10)));
        assert!(!config.contains(Key::new(20)));
    }
}
