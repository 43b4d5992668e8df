//! Domain primitives, ports, and services for the user directory.
//!
//! Purpose: define strongly typed user entities and the use-cases that the
//! HTTP adapter drives. Types here stay transport agnostic: no Actix, no
//! MongoDB, no OpenAPI derives.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-neutral failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable failure category.
//! - User, UserId, NewUser: the single resource this service manages.
//! - UsersService: create/list/get/delete use-cases over a repository port.
//! - is_valid_email: the syntactic email predicate.

pub mod email;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod users_service;

pub use self::email::is_valid_email;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DocumentId, EmailAddress, NewUser, User, UserId, UserName, UserValidationError};
pub use self::users_service::{USER_NOT_FOUND_MESSAGE, UsersService};
