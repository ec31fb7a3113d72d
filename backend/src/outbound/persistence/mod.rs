//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the `UserRepository` port over PostgreSQL via `diesel-async` and
//! `bb8` connection pooling, plus the embedded migrations that create the
//! `users` table.
//!
//! - **Thin adapter**: the repository only translates between Diesel rows and
//!   domain types. Business rules stay in the domain service.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures map to
//!   `UserPersistenceError`.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig, run_migrations};
//!
//! run_migrations("postgres://localhost/users").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
