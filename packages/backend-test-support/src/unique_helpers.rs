//! Unique test identifiers built from ULIDs, so tests sharing one in-memory
//! registry never collide on user or room names.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use pairflip_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("user");
/// let b = unique_str("user");
/// assert_ne!(a, b);
/// assert!(a.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique user id for a named test participant.
pub fn unique_user(name: &str) -> String {
    unique_str(&format!("user-{name}"))
}
