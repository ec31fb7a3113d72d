//! Users API handlers.
//!
//! ```text
//! GET    /users?page=0&size=5
//! GET    /users/search?first_name=Ada&page=0&size=5
//! POST   /users {"first_name":"Ada","last_name":"Lovelace","email":"ada@example.com"}
//! PUT    /users/{id} {"first_name":"Ada","last_name":"King","email":"ada@example.com"}
//! DELETE /users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, http::header::ContentType, post, put, web};
use pagination::PageEnvelope;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, User, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserPageSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FIRST_NAME, LAST_NAME, parse_email, parse_page_request, parse_person_name, parse_user_id,
};

/// Request body for `POST /users` and `PUT /users/{id}`.
///
/// Fields are optional at the wire level so validation can name the missing
/// field instead of failing deserialisation wholesale.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UserRequest {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = Error;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: parse_person_name(value.first_name, FIRST_NAME)?,
            last_name: parse_person_name(value.last_name, LAST_NAME)?,
            email: Some(parse_email(value.email)?),
        })
    }
}

/// User record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().value(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Register the user routes. `/users/search` is registered ahead of
/// `/users/{id}` so the literal segment wins.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::users;
///
/// let app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search_users)
        .service(list_users)
        .service(create_user)
        .service(update_user)
        .service(delete_user);
}

/// Paging parameters shared by list and search.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page number (default 0).
    pub page: Option<i64>,
    /// Page size (default 5).
    pub size: Option<i64>,
}

/// Query parameters for `GET /users/search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Exact first name to match. `firstName` is accepted as an alias.
    #[serde(alias = "firstName")]
    pub first_name: Option<String>,
    /// Zero-based page number (default 0).
    pub page: Option<i64>,
    /// Page size (default 5).
    pub size: Option<i64>,
}

/// List users one page at a time.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of users", body = UserPageSchema),
        (status = 406, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<PageEnvelope<UserResponse>>> {
    let PageQuery { page, size } = query.into_inner();
    let request = parse_page_request(page, size)?;
    let users = state.users.list_users(request).await?;
    Ok(web::Json(PageEnvelope::from(users.map(UserResponse::from))))
}

/// Search users by exact first name.
#[utoipa::path(
    get,
    path = "/users/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Page of matching users", body = UserPageSchema),
        (status = 404, description = "No page could be produced", body = ErrorSchema),
        (status = 406, description = "Missing name or invalid paging", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "searchUsers"
)]
#[get("/users/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<PageEnvelope<UserResponse>>> {
    let SearchQuery {
        first_name,
        page,
        size,
    } = query.into_inner();
    let request = parse_page_request(page, size)?;
    let users = state
        .users
        .search_users(first_name.as_deref(), request)
        .await?;
    Ok(web::Json(PageEnvelope::from(users.map(UserResponse::from))))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 406, description = "Invalid or missing fields", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.user_commands.create_user(draft).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Update a user's names and, when it changes, email.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 406, description = "Invalid or missing fields", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path.into_inner())?;
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.user_commands.update_user(Some(id), draft).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 406, description = "Invalid identifier", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path.into_inner())?;
    state.user_commands.delete_user(Some(id)).await?;
    info!(%id, "user deleted over HTTP");
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(format!("Successful deleted user {id}")))
}

#[cfg(test)]
mod tests;
