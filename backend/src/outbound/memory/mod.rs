//! In-process `UserRepository` adapter.
//!
//! Records live in a mutex-guarded ordered map keyed by identifier, so page
//! order matches identifier order just like the PostgreSQL adapter. Email
//! uniqueness is enforced on every write, mirroring the unique index on the
//! `users` table.
//!
//! The server falls back to this store when no database URL is configured.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId};

#[derive(Debug, Default)]
struct Records {
    users: BTreeMap<UserId, User>,
    last_id: i64,
}

impl Records {
    fn email_owner(&self, email: &EmailAddress) -> Option<&User> {
        self.users.values().find(|user| user.email() == email)
    }

    fn next_id(&mut self) -> UserId {
        self.last_id += 1;
        UserId::new(self.last_id)
    }
}

/// Thread-safe in-memory user store assigning sequential identifiers from 1.
///
/// # Examples
/// ```
/// use backend::outbound::memory::InMemoryUserRepository;
///
/// let repository = InMemoryUserRepository::new();
/// assert_eq!(repository.len(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    records: Mutex<Records>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records. A poisoned lock reports zero.
    pub fn len(&self) -> usize {
        self.lock().map(|records| records.users.len()).unwrap_or(0)
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, UserPersistenceError> {
        self.records
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

fn paginate<'a>(
    users: impl Iterator<Item = &'a User>,
    request: PageRequest,
) -> Page<User> {
    let matching: Vec<&User> = users.collect();
    let total = matching.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let items = matching
        .into_iter()
        .skip(offset)
        .take(request.size() as usize)
        .cloned()
        .collect();
    Page::new(items, request, total)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self, request: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        let records = self.lock()?;
        Ok(paginate(records.users.values(), request))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let records = self.lock()?;
        Ok(records.email_owner(email).cloned())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let records = self.lock()?;
        Ok(records.email_owner(email).is_some())
    }

    async fn find_by_first_name(
        &self,
        first_name: &str,
        request: PageRequest,
    ) -> Result<Option<Page<User>>, UserPersistenceError> {
        let records = self.lock()?;
        let matching = records
            .users
            .values()
            .filter(|user| user.first_name().as_str() == first_name);
        Ok(Some(paginate(matching, request)))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let records = self.lock()?;
        Ok(records.users.get(&id).cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut records = self.lock()?;
        if records.email_owner(&user.email).is_some() {
            return Err(UserPersistenceError::duplicate_email(user.email.to_string()));
        }
        let id = records.next_id();
        let stored = user.clone().with_id(id);
        records.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut records = self.lock()?;
        let taken = records
            .email_owner(user.email())
            .is_some_and(|owner| owner.id() != user.id());
        if taken {
            return Err(UserPersistenceError::duplicate_email(user.email().to_string()));
        }
        match records.users.get_mut(&user.id()) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user.clone())
            }
            None => Err(UserPersistenceError::query(format!(
                "user {} not stored",
                user.id()
            ))),
        }
    }

    async fn delete(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut records = self.lock()?;
        records.users.remove(&user.id());
        Ok(())
    }
}
