//! Domain ports for the hexagonal boundary.
//!
//! Driven ports ([`UserRepository`]) are implemented by outbound adapters;
//! driving ports ([`UsersCommand`], [`UsersQuery`]) are implemented by the
//! domain service and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod user_repository;
#[cfg(any(test, feature = "test-support"))]
mod user_store_reset;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(any(test, feature = "test-support"))]
pub use user_store_reset::UserStoreReset;
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
