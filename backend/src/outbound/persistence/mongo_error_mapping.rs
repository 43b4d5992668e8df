//! Mapping from MongoDB driver errors to user persistence errors.

use mongodb::error::{Error as MongoError, ErrorKind};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

/// Classify a driver error as a connection or query failure.
///
/// Server selection, I/O, pool and authentication failures mean the
/// deployment could not be reached; everything else happened while a
/// command was running.
pub(super) fn map_mongo_error(error: &MongoError) -> UserPersistenceError {
    debug!(error = %error, "mongodb operation failed");
    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Authentication { .. }
        | ErrorKind::DnsResolve { .. } => UserPersistenceError::connection(error.to_string()),
        _ => UserPersistenceError::query(error.to_string()),
    }
}
