//! Lazily established MongoDB client.
//!
//! The driver keeps its own connection pool, so this wrapper only decides
//! when a [`Client`] exists. The first repository call creates it, later
//! calls reuse it, and [`MongoConnection::disconnect`] drops it so the next
//! call reconnects. All three paths go through one async mutex, so
//! concurrent first calls produce a single client.

use mongodb::bson::doc;
use mongodb::{Client, Database};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::mongo_error_mapping::map_mongo_error;
use crate::domain::ports::UserPersistenceError;

/// Database used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "test_case";

/// Connection string used when none is configured.
pub const DEFAULT_MONGO_URI: &str = "mongodb://127.0.0.1:27017/test_case";

/// Shared handle to a MongoDB deployment.
///
/// # Examples
/// ```no_run
/// use roster::outbound::persistence::MongoConnection;
///
/// # async fn demo() -> Result<(), roster::domain::ports::UserPersistenceError> {
/// let connection = MongoConnection::new("mongodb://127.0.0.1:27017/test_case");
/// let database = connection.database().await?;
/// assert_eq!(database.name(), "test_case");
/// connection.disconnect().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MongoConnection {
    uri: String,
    client: Mutex<Option<Client>>,
}

impl MongoConnection {
    /// Prepare a connection; nothing is dialled until first use.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            client: Mutex::new(None),
        }
    }

    /// Connection string this handle dials.
    pub fn uri(&self) -> &str {
        self.uri.as_str()
    }

    /// Whether a client currently exists.
    pub async fn is_connected(&self) -> bool {
        self.client.lock().await.is_some()
    }

    /// Return the configured database, connecting first if needed.
    ///
    /// A fresh client is pinged before it is kept, so an unreachable
    /// deployment surfaces here as [`UserPersistenceError::Connection`]
    /// instead of on the first query.
    pub async fn database(&self) -> Result<Database, UserPersistenceError> {
        let mut guard = self.client.lock().await;
        if let Some(client) = guard.as_ref() {
            return Ok(database_for(client));
        }

        debug!("opening MongoDB client");
        let client = Client::with_uri_str(&self.uri)
            .await
            .map_err(|err| UserPersistenceError::connection(err.to_string()))?;
        let database = database_for(&client);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| map_mongo_error(&err))?;
        info!(database = database.name(), "connected to MongoDB");
        *guard = Some(client);
        Ok(database)
    }

    /// Close the client if one is open. Calling this twice is harmless.
    pub async fn disconnect(&self) {
        let client = self.client.lock().await.take();
        if let Some(client) = client {
            client.shutdown().await;
            info!("disconnected from MongoDB");
        }
    }
}

fn database_for(client: &Client) -> Database {
    client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE))
}
