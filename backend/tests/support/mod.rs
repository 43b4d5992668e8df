//! Shared helper utilities for backend integration tests.

mod mongo_skip;

pub use mongo_skip::{handle_mongo_setup_failure, test_mongo_uri};
