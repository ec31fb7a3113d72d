//! User record service.
//!
//! Implements the [`UsersQuery`] and [`UsersCommand`] driving ports on top of a
//! [`UserRepository`]. The service is stateless: every rule it enforces is
//! checked against the store on each call, so email uniqueness here is a
//! check-then-act guard. Adapters with a unique index surface write-time
//! collisions as [`UserPersistenceError::DuplicateEmail`], which the service
//! reports as a conflict too.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::{info, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{EmailAddress, Error, NewUser, User, UserDraft, UserId};

pub(crate) const CREATE_CONFLICT_MESSAGE: &str = "User already exists";
pub(crate) const UPDATE_CONFLICT_MESSAGE: &str = "User with this email already exists";
pub(crate) const MISSING_EMAIL_MESSAGE: &str = "Email cannot be null or empty";
pub(crate) const MISSING_ID_MESSAGE: &str = "Id can not be null.";
pub(crate) const MISSING_NAME_MESSAGE: &str = "Name can not be null or empty";
pub(crate) const USER_NOT_FOUND_MESSAGE: &str = "User not found. Maybe you entered wrong or negative id?";
pub(crate) const SEARCH_UNAVAILABLE_MESSAGE: &str = "User not found";

/// User service implementing the user driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError, conflict_message: &str) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { email } => {
                warn!(%email, "store rejected duplicate email");
                Error::conflict(conflict_message)
            }
        }
    }

    fn map_read_error(error: UserPersistenceError) -> Error {
        Self::map_persistence_error(error, CREATE_CONFLICT_MESSAGE)
    }

    async fn email_taken(&self, email: &EmailAddress) -> Result<bool, Error> {
        self.repository
            .exists_by_email(email)
            .await
            .map_err(Self::map_read_error)
    }

    async fn require_existing(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_read_error)?
            .ok_or_else(|| {
                warn!(%id, "requested user does not exist");
                Error::not_found(USER_NOT_FOUND_MESSAGE)
            })
    }

    fn require_id(id: Option<UserId>) -> Result<UserId, Error> {
        id.ok_or_else(|| {
            warn!("requested id is absent");
            Error::missing_input(MISSING_ID_MESSAGE)
        })
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, Error> {
        self.repository
            .find_all(request)
            .await
            .map_err(Self::map_read_error)
    }

    async fn search_users(
        &self,
        first_name: Option<&str>,
        request: PageRequest,
    ) -> Result<Page<User>, Error> {
        let Some(name) = first_name.filter(|name| !name.is_empty()) else {
            warn!("requested name is absent or empty");
            return Err(Error::missing_input(MISSING_NAME_MESSAGE));
        };

        self.repository
            .find_by_first_name(name, request)
            .await
            .map_err(Self::map_read_error)?
            .ok_or_else(|| Error::not_found(SEARCH_UNAVAILABLE_MESSAGE))
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        info!(?draft, "creating user");
        // Uniqueness is checked before presence; an absent email cannot be
        // stored, so the order only decides which rejection a caller sees.
        if let Some(email) = draft.email.as_ref() {
            if self.email_taken(email).await? {
                warn!(%email, "requested email already registered");
                return Err(Error::conflict(CREATE_CONFLICT_MESSAGE));
            }
        }

        let Some(email) = draft.email else {
            warn!("requested email is absent");
            return Err(Error::missing_input(MISSING_EMAIL_MESSAGE));
        };

        let new_user = NewUser {
            first_name: draft.first_name,
            last_name: draft.last_name,
            email,
        };
        let user = self
            .repository
            .insert(&new_user)
            .await
            .map_err(|err| Self::map_persistence_error(err, CREATE_CONFLICT_MESSAGE))?;
        info!(id = %user.id(), "created user");
        Ok(user)
    }

    async fn update_user(&self, id: Option<UserId>, draft: UserDraft) -> Result<User, Error> {
        info!(?id, ?draft, "updating user");
        let id = Self::require_id(id)?;
        let mut user = self.require_existing(id).await?;

        // An unchanged email belongs to this record and is not checked again.
        if let Some(email) = draft.email.filter(|email| email != user.email()) {
            if self.email_taken(&email).await? {
                warn!(%email, "requested email already registered");
                return Err(Error::conflict(UPDATE_CONFLICT_MESSAGE));
            }
            user.change_email(email);
        }
        user.rename(draft.first_name, draft.last_name);

        let updated = self
            .repository
            .update(&user)
            .await
            .map_err(|err| Self::map_persistence_error(err, UPDATE_CONFLICT_MESSAGE))?;
        info!(%id, "updated user");
        Ok(updated)
    }

    async fn delete_user(&self, id: Option<UserId>) -> Result<(), Error> {
        info!(?id, "deleting user");
        let id = Self::require_id(id)?;
        let user = self.require_existing(id).await?;

        self.repository
            .delete(&user)
            .await
            .map_err(Self::map_read_error)?;
        info!(%id, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
