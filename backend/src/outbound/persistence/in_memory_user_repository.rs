//! Process-local user repository.
//!
//! Users live in an insertion-ordered `Vec` next to a counter that starts at
//! 1 and only moves forward, so identifiers are never reassigned after a
//! delete. Both sit behind one mutex: concurrent requests on different actix
//! workers cannot interleave a counter bump with the push that uses it.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

#[derive(Debug)]
struct InMemoryState {
    users: Vec<User>,
    next_id: u64,
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }
}

/// In-memory [`UserRepository`] with sequential identifiers.
///
/// Construct one per server (or per test) and share it through an `Arc`;
/// there is no process-wide instance.
///
/// # Examples
/// ```
/// use roster::domain::ports::UserRepository;
/// use roster::domain::{NewUser, UserId};
/// use roster::outbound::persistence::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryUserRepository::new();
/// let user = NewUser::try_from_parts(Some("Alice"), Some("alice@example.com")).unwrap();
/// let created = repo.create(user).await.unwrap();
/// assert_eq!(created.id(), &UserId::Sequential(1));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<InMemoryState>,
}

impl InMemoryUserRepository {
    /// Create an empty store whose first identifier will be 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, InMemoryState>, UserPersistenceError> {
        self.state
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    fn parse_id(&self, raw: &str) -> Option<UserId> {
        UserId::parse_sequential(raw)
    }

    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock()?;
        let id = state.next_id;
        state.next_id = id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("sequential user ids exhausted"))?;
        let created = user.into_user(UserId::Sequential(id));
        state.users.push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.users.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock()?;
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock()?;
        match state.users.iter().position(|user| user.id() == id) {
            Some(index) => {
                state.users.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl crate::domain::ports::UserStoreReset for InMemoryUserRepository {
    async fn reset(&self) -> Result<(), UserPersistenceError> {
        *self.lock()? = InMemoryState::default();
        Ok(())
    }
}
