//! Builders for the user store and the HTTP state that wraps it.

use std::sync::Arc;

use actix_web::web;

use roster::domain::UsersService;
use roster::domain::ports::UserRepository;
use roster::inbound::http::state::HttpState;
use roster::outbound::persistence::{
    InMemoryUserRepository, MongoConnection, MongoUserRepository,
};

use super::config::StorageBackend;

/// Repository selected for this process, plus whatever needs closing on exit.
pub struct UserStore {
    repository: Arc<dyn UserRepository>,
    mongo: Option<Arc<MongoConnection>>,
}

impl UserStore {
    /// Construct the adapter for `backend`.
    ///
    /// Nothing is dialled here; the MongoDB client opens on first use.
    pub fn for_backend(backend: &StorageBackend) -> Self {
        match backend {
            StorageBackend::InMemory => Self {
                repository: Arc::new(InMemoryUserRepository::new()),
                mongo: None,
            },
            StorageBackend::Mongo { uri } => {
                let connection = Arc::new(MongoConnection::new(uri.clone()));
                Self {
                    repository: Arc::new(MongoUserRepository::new(connection.clone())),
                    mongo: Some(connection),
                }
            }
        }
    }

    /// Close the MongoDB client if one was opened.
    pub async fn shutdown(&self) {
        if let Some(connection) = &self.mongo {
            connection.disconnect().await;
        }
    }
}

/// Wrap the store's repository in the user service and expose it to handlers.
pub fn build_http_state(store: &UserStore) -> web::Data<HttpState> {
    let service = Arc::new(UsersService::new(store.repository.clone()));
    web::Data::new(HttpState::from_service(service))
}
