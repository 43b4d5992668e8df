//! User directory use-cases.
//!
//! [`UsersService`] implements the driving ports on top of a single
//! [`UserRepository`] chosen at startup. It owns the outcome mapping:
//! repository misses become not-found errors and persistence failures become
//! internal errors whose cause is logged here and never shown to clients.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User};

/// Message returned for unknown or malformed user identifiers.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found.";

/// Create/list/get/delete use-cases backed by a [`UserRepository`].
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use roster::domain::UsersService;
/// use roster::outbound::persistence::InMemoryUserRepository;
///
/// let service = UsersService::new(Arc::new(InMemoryUserRepository::new()));
/// ```
#[derive(Clone)]
pub struct UsersService {
    repository: Arc<dyn UserRepository>,
}

impl UsersService {
    /// Build the service over a repository adapter.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

fn not_found() -> Error {
    Error::not_found(USER_NOT_FOUND_MESSAGE)
}

fn persistence_failure(operation: &'static str, err: UserPersistenceError) -> Error {
    error!(operation, error = %err, "user repository failure");
    Error::internal(err.to_string())
}

#[async_trait]
impl UsersCommand for UsersService {
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        let created = self
            .repository
            .create(user)
            .await
            .map_err(|err| persistence_failure("create", err))?;
        info!(user_id = %created.id(), "user created");
        Ok(created)
    }

    async fn delete_user(&self, raw_id: &str) -> Result<(), Error> {
        let Some(id) = self.repository.parse_id(raw_id) else {
            debug!(raw_id, "delete requested for unparsable user id");
            return Err(not_found());
        };
        let deleted = self
            .repository
            .delete_by_id(&id)
            .await
            .map_err(|err| persistence_failure("delete", err))?;
        if !deleted {
            return Err(not_found());
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl UsersQuery for UsersService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list()
            .await
            .map_err(|err| persistence_failure("list", err))
    }

    async fn get_user(&self, raw_id: &str) -> Result<User, Error> {
        let Some(id) = self.repository.parse_id(raw_id) else {
            debug!(raw_id, "lookup requested for unparsable user id");
            return Err(not_found());
        };
        self.repository
            .find_by_id(&id)
            .await
            .map_err(|err| persistence_failure("get", err))?
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    //! Outcome mapping over a mocked repository.

    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{ErrorCode, UserId};
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn alice() -> NewUser {
        NewUser::try_from_parts(Some("Alice"), Some("alice@example.com")).expect("valid user")
    }

    fn service(repository: MockUserRepository) -> UsersService {
        UsersService::new(Arc::new(repository))
    }

    fn sequential_ids(repository: &mut MockUserRepository) {
        repository
            .expect_parse_id()
            .returning(|raw| UserId::parse_sequential(raw));
    }

    #[rstest]
    #[tokio::test]
    async fn create_returns_repository_user(alice: NewUser) {
        let mut repository = MockUserRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|user| Ok(user.into_user(UserId::Sequential(1))));

        let created = service(repository)
            .create_user(alice)
            .await
            .expect("create succeeds");
        assert_eq!(created.id(), &UserId::Sequential(1));
        assert_eq!(created.name().as_ref(), "Alice");
    }

    #[rstest]
    #[tokio::test]
    async fn create_maps_persistence_failure_to_internal(alice: NewUser) {
        let mut repository = MockUserRepository::new();
        repository
            .expect_create()
            .returning(|_| Err(UserPersistenceError::connection("refused")));

        let err = service(repository)
            .create_user(alice)
            .await
            .expect_err("create fails");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn get_unparsable_id_skips_repository() {
        let mut repository = MockUserRepository::new();
        sequential_ids(&mut repository);
        repository.expect_find_by_id().never();

        let err = service(repository)
            .get_user("not-a-number")
            .await
            .expect_err("lookup fails");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), USER_NOT_FOUND_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn get_miss_is_not_found() {
        let mut repository = MockUserRepository::new();
        sequential_ids(&mut repository);
        repository
            .expect_find_by_id()
            .with(eq(UserId::Sequential(99)))
            .returning(|_| Ok(None));

        let err = service(repository)
            .get_user("99")
            .await
            .expect_err("lookup fails");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_miss_is_not_found() {
        let mut repository = MockUserRepository::new();
        sequential_ids(&mut repository);
        repository
            .expect_delete_by_id()
            .with(eq(UserId::Sequential(999)))
            .returning(|_| Ok(false));

        let err = service(repository)
            .delete_user("999")
            .await
            .expect_err("delete fails");
        assert_eq!(err.message(), USER_NOT_FOUND_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_hit_succeeds() {
        let mut repository = MockUserRepository::new();
        sequential_ids(&mut repository);
        repository.expect_delete_by_id().returning(|_| Ok(true));

        service(repository)
            .delete_user("1")
            .await
            .expect("delete succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn list_maps_query_failure_to_internal() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_list()
            .returning(|| Err(UserPersistenceError::query("cursor died")));

        let err = service(repository)
            .list_users()
            .await
            .expect_err("list fails");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
