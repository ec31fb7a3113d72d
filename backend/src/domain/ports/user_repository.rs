//! Port abstraction for user record stores and their errors.
//!
//! The record store is the only shared mutable resource in the service.
//! Adapters translate between their storage model and the domain [`User`];
//! they hold no business rules beyond enforcing email uniqueness at write time
//! where the backing store supports it.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{EmailAddress, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A write collided with an existing record's email.
        DuplicateEmail { email: String } => "email already stored: {email}",
    }
}

/// Record store for users.
///
/// `insert` and `update` together form the store's save operation: `insert`
/// assigns a fresh identifier, `update` overwrites an existing record in
/// place.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return one page of all records in store order.
    async fn find_all(&self, request: PageRequest) -> Result<Page<User>, UserPersistenceError>;

    /// Fetch the record holding `email`, if any.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Report whether any record holds `email`.
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;

    /// Return one page of records whose first name equals `first_name`.
    ///
    /// `None` signals that the store could not produce a page at all, which
    /// is distinct from an empty page.
    async fn find_by_first_name(
        &self,
        first_name: &str,
        request: PageRequest,
    ) -> Result<Option<Page<User>>, UserPersistenceError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Persist a new record and return it with its assigned identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Overwrite an existing record and return the stored state.
    async fn update(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Remove a record.
    async fn delete(&self, user: &User) -> Result<(), UserPersistenceError>;
}
