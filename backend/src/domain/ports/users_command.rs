//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Domain use-case port for creating, updating and deleting users.
///
/// Identifiers are optional so adapters can forward an absent identifier and
/// let the domain decide how to reject it.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user from `draft`, enforcing email uniqueness.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Update the user identified by `id` from `draft`.
    async fn update_user(&self, id: Option<UserId>, draft: UserDraft) -> Result<User, Error>;

    /// Delete the user identified by `id`.
    async fn delete_user(&self, id: Option<UserId>) -> Result<(), Error>;
}
