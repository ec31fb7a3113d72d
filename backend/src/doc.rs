//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the users endpoints and the health probes
//! - **Schemas**: request and response bodies plus the domain wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`], [`UserPageSchema`]) that provide
//!   OpenAPI definitions without coupling domain types to utoipa
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::health::{Phase, ProbeBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserPageSchema};
use crate::inbound::http::users::{UserRequest, UserResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users backend API",
        description = "Paginated listing, first-name search and email-unique CRUD over user records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::search_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserRequest,
        UserResponse,
        UserPageSchema,
        ErrorSchema,
        ErrorCodeSchema,
        ProbeBody,
        Phase
    )),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
