//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

use crate::inbound::http::users::UserResponse;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// A required identifier, email or search name was absent.
    #[schema(rename = "missing_input")]
    MissingInput,
    /// The request body or parameters failed validation.
    #[schema(rename = "shape_invalid")]
    ShapeInvalid,
    /// The email is already registered to another user.
    #[schema(rename = "conflict")]
    Conflict,
    /// The requested user does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The record store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "User already exists")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`pagination::PageEnvelope`] of users.
#[derive(ToSchema)]
#[schema(as = UserPage)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserPageSchema {
    /// Users on this page, ordered by identifier.
    content: Vec<UserResponse>,
    /// Zero-based page number.
    #[schema(example = 0)]
    number: u32,
    /// Requested page size.
    #[schema(example = 5)]
    size: u32,
    /// Total users across all pages.
    #[schema(example = 12)]
    total_elements: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    total_pages: u64,
    /// Number of users on this page.
    #[schema(example = 5)]
    number_of_elements: usize,
    /// Whether this is the first page.
    first: bool,
    /// Whether this is the last page.
    last: bool,
    /// Whether the page holds no users.
    empty: bool,
}
