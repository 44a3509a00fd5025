//! Test helpers for generating unique test data
//!
//! ULID-suffixed values keep test rows distinguishable when several tests
//! share one database.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("module");
/// let id2 = unique_str("module");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("module-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique module name, e.g. `DESK-01J...`
pub fn unique_module_name() -> String {
    unique_str("DESK")
}
