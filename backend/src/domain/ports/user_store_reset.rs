//! Test-fixture capability for wiping a user store between cases.
//!
//! Kept apart from [`super::UserRepository`] and compiled only for tests or
//! the `test-support` feature, so no production path can clear the store.

use async_trait::async_trait;

use super::UserPersistenceError;

/// Clear every stored user and rewind any identifier state.
#[async_trait]
pub trait UserStoreReset: Send + Sync {
    /// Return the store to its freshly constructed state.
    async fn reset(&self) -> Result<(), UserPersistenceError>;
}
