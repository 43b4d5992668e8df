//! Policy for MongoDB-backed integration tests.
//!
//! Tests read the server address from `ROSTER_TEST_MONGO_URI`. When it is
//! missing or unreachable they fail, unless `SKIP_TEST_MONGO` is truthy, in
//! which case they print a skip marker and return early.

/// Environment variable naming the MongoDB deployment used by tests.
pub const TEST_MONGO_URI_VAR: &str = "ROSTER_TEST_MONGO_URI";

/// Returns true when `SKIP_TEST_MONGO` is "1", "true" or "yes"
/// (case-insensitive).
pub fn should_skip_test_mongo() -> bool {
    std::env::var("SKIP_TEST_MONGO")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handle a MongoDB setup failure consistently across suites.
///
/// Returns `None` after printing a skip marker when skipping is allowed,
/// otherwise panics so CI breakage is not masked.
pub fn handle_mongo_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_mongo() {
        eprintln!("SKIP-TEST-MONGO: {reason}");
        None
    } else {
        panic!("MongoDB test setup failed: {reason}. Set SKIP_TEST_MONGO=1 to skip.");
    }
}

/// Connection string for tests, or the setup-failure outcome when unset.
pub fn test_mongo_uri() -> Option<String> {
    match std::env::var(TEST_MONGO_URI_VAR) {
        Ok(uri) if !uri.trim().is_empty() => Some(uri),
        _ => handle_mongo_setup_failure(format!("{TEST_MONGO_URI_VAR} is not set")),
    }
}
