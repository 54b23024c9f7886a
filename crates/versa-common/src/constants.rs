//! Shared constants for VersaTree.

// =============================================================================
// Key Domain
// =============================================================================

/// Exclusive lower bound of the valid key domain.
///
/// Keys must be strictly greater than this value to be considered valid.
/// The sentinel node carries key 0, which this bound deliberately excludes.
pub const KEY_DOMAIN_MIN: i64 = 0;

/// Exclusive upper bound of the valid key domain.
///
/// Inherited from the system this engine replaces; the exact value has no
/// known domain justification, but dropping it would change observable
/// behavior for out-of-range keys, so it is kept verbatim.
pub const KEY_DOMAIN_MAX: i64 = 38_484_704;
