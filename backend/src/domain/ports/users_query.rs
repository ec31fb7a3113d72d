//! Driving port for user read operations.
//!
//! Inbound adapters (HTTP handlers) use this port to list and search user
//! records without importing outbound persistence concerns.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, User};

/// Domain use-case port for listing and searching users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return one page of all users, exactly as the store produced it.
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, Error>;

    /// Return one page of users whose first name equals `first_name`.
    ///
    /// An absent or empty name is rejected with
    /// [`ErrorCode::MissingInput`](crate::domain::ErrorCode::MissingInput).
    async fn search_users(
        &self,
        first_name: Option<&str>,
        request: PageRequest,
    ) -> Result<Page<User>, Error>;
}
