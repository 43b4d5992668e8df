//! Driving port for user mutations.
//!
//! Inbound adapters call this port after turning the request body into a
//! validated [`NewUser`]; validation failures therefore never reach it.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User};

/// Domain use-case port for creating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Persist a validated user.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Delete the user named by the raw path identifier.
    ///
    /// Unknown and malformed identifiers both yield a not-found error.
    async fn delete_user(&self, raw_id: &str) -> Result<(), Error>;
}
