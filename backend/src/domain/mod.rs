//! Domain primitives, ports and services.
//!
//! Purpose: Define strongly typed user records, the error vocabulary shared by
//! every adapter, and the service that enforces record invariants. Types here
//! are transport agnostic; inbound adapters own their wire formats.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — domain error payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - TraceId (alias to `trace_id::TraceId`) — request correlation identifier.
//! - User, NewUser, UserDraft and their value types (from `user`).
//! - UserService (alias to `user_service::UserService`) — driving port
//!   implementation.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, EmailAddress, NewUser, PERSON_NAME_MAX, PersonName, User, UserDraft, UserId,
    UserValidationError,
};
pub use self::user_service::UserService;
