//! MongoDB-backed user repository.
//!
//! Users are stored in the `users` collection as
//! `{ _id: ObjectId, name, email, createdAt }`. Listing sorts on `createdAt`
//! so results follow creation order like the in-memory store; documents
//! written without `createdAt` sort first.
//!
//! Stored documents are read back as they are. Names and emails are only
//! validated on the way in.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{DateTime, doc};
use serde::{Deserialize, Serialize};

use super::mongo_connection::MongoConnection;
use super::mongo_error_mapping::map_mongo_error;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DocumentId, EmailAddress, NewUser, User, UserId, UserName};

/// Collection holding user documents.
pub const USERS_COLLECTION: &str = "users";

#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    email: String,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<DateTime>,
}

impl UserDocument {
    fn from_new_user(user: &NewUser) -> Self {
        Self {
            id: None,
            name: user.name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            created_at: Some(DateTime::now()),
        }
    }

    fn into_domain(self) -> Result<User, UserPersistenceError> {
        let object_id = self
            .id
            .ok_or_else(|| UserPersistenceError::query("stored user document has no _id"))?;
        Ok(User::new(
            document_id(object_id)?,
            UserName::from_stored(self.name),
            EmailAddress::from_stored(self.email),
        ))
    }
}

fn document_id(object_id: ObjectId) -> Result<UserId, UserPersistenceError> {
    DocumentId::new(object_id.to_hex())
        .map(UserId::Document)
        .map_err(|err| UserPersistenceError::query(err.to_string()))
}

fn object_id_of(id: &UserId) -> Option<ObjectId> {
    match id {
        UserId::Document(document) => ObjectId::parse_str(document.as_ref()).ok(),
        UserId::Sequential(_) => None,
    }
}

/// [`UserRepository`] over a MongoDB collection.
///
/// Identifiers are the hex form of the document's `ObjectId`. Text that is
/// not a 24-character hex string is rejected by
/// [`UserRepository::parse_id`] without contacting the server.
#[derive(Debug, Clone)]
pub struct MongoUserRepository {
    connection: Arc<MongoConnection>,
}

impl MongoUserRepository {
    /// Build a repository over a shared connection.
    pub fn new(connection: Arc<MongoConnection>) -> Self {
        Self { connection }
    }

    /// Connection backing this repository.
    pub fn connection(&self) -> &Arc<MongoConnection> {
        &self.connection
    }

    async fn collection(&self) -> Result<Collection<UserDocument>, UserPersistenceError> {
        let database = self.connection.database().await?;
        Ok(database.collection(USERS_COLLECTION))
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    fn parse_id(&self, raw: &str) -> Option<UserId> {
        UserId::parse_document(raw)
    }

    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let collection = self.collection().await?;
        let document = UserDocument::from_new_user(&user);
        let inserted = collection
            .insert_one(&document)
            .await
            .map_err(|err| map_mongo_error(&err))?;
        let object_id = inserted
            .inserted_id
            .as_object_id()
            .ok_or_else(|| UserPersistenceError::query("insert returned a non-ObjectId _id"))?;
        Ok(user.into_user(document_id(object_id)?))
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let collection = self.collection().await?;
        let documents: Vec<UserDocument> = collection
            .find(doc! {})
            .sort(doc! { "createdAt": 1, "_id": 1 })
            .await
            .map_err(|err| map_mongo_error(&err))?
            .try_collect()
            .await
            .map_err(|err| map_mongo_error(&err))?;
        documents.into_iter().map(UserDocument::into_domain).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let Some(object_id) = object_id_of(id) else {
            return Ok(None);
        };
        let collection = self.collection().await?;
        collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|err| map_mongo_error(&err))?
            .map(UserDocument::into_domain)
            .transpose()
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let Some(object_id) = object_id_of(id) else {
            return Ok(false);
        };
        let collection = self.collection().await?;
        let result = collection
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|err| map_mongo_error(&err))?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl crate::domain::ports::UserStoreReset for MongoUserRepository {
    async fn reset(&self) -> Result<(), UserPersistenceError> {
        let collection = self.collection().await?;
        collection
            .delete_many(doc! {})
            .await
            .map_err(|err| map_mongo_error(&err))?;
        Ok(())
    }
}
