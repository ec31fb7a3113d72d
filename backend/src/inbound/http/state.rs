//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};
use crate::domain::UserService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub user_commands: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from the two user driving ports.
    pub fn new(users: Arc<dyn UsersQuery>, user_commands: Arc<dyn UsersCommand>) -> Self {
        Self {
            users,
            user_commands,
        }
    }

    /// Construct state with a [`UserService`] serving both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryUserRepository;
    ///
    /// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::new()));
    /// let _users = state.users.clone();
    /// ```
    pub fn from_repository<R>(repository: Arc<R>) -> Self
    where
        R: UserRepository + 'static,
    {
        let service = Arc::new(UserService::new(repository));
        Self::new(service.clone(), service)
    }
}
