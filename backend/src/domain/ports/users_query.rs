//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch users without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user in creation order; an empty list is not an error.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Fetch the user named by the raw path identifier.
    async fn get_user(&self, raw_id: &str) -> Result<User, Error>;
}
