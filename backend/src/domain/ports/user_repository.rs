//! Driven port for user persistence adapters and their errors.
//!
//! Two adapters implement [`UserRepository`]: an in-memory sequence with
//! counter-assigned identifiers and a MongoDB collection with store-generated
//! object ids. The service layer only sees this trait, so the identifier
//! shape stays an adapter decision exposed through [`UserRepository::parse_id`].

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "user repository query failed: {message}",
    }
}

/// Storage capability for the user collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Interpret a client-supplied identifier for this backend.
    ///
    /// Returns `None` when the text cannot name a record in this store; the
    /// caller treats that exactly like a miss and never queries the store.
    fn parse_id(&self, raw: &str) -> Option<UserId>;

    /// Persist a new user and return it with its assigned identifier.
    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError>;

    /// Return every stored user in creation order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user, returning whether a record existed.
    async fn delete_by_id(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
