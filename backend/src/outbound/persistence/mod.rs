//! User persistence adapters.
//!
//! - [`InMemoryUserRepository`]: process-local store with sequential ids
//! - [`MongoUserRepository`]: `users` collection with `ObjectId` ids, sharing
//!   a lazily opened [`MongoConnection`]
//!
//! Adapters translate between storage records and domain types and map
//! driver failures to [`crate::domain::ports::UserPersistenceError`]. They
//! hold no business rules.

mod in_memory_user_repository;
mod mongo_connection;
mod mongo_error_mapping;
mod mongo_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
pub use mongo_connection::{DEFAULT_DATABASE, DEFAULT_MONGO_URI, MongoConnection};
pub use mongo_user_repository::{MongoUserRepository, USERS_COLLECTION};
