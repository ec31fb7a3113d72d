//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure raised here is an [`ErrorCode::ShapeInvalid`] error carrying
//! `{ "field", "code" }` details so clients can highlight the offending input.
//!
//! [`ErrorCode::ShapeInvalid`]: crate::domain::ErrorCode::ShapeInvalid

use actix_web::{HttpRequest, error::JsonPayloadError, error::QueryPayloadError, web};
use pagination::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, PageRequest, PageRequestError};
use serde_json::json;
use tracing::warn;

use crate::domain::{EmailAddress, Error, PersonName, UserId, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidLength,
    InvalidEmail,
    TooLong,
    InvalidId,
    InvalidPage,
    InvalidBody,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidLength => "invalid_length",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidPage => "invalid_page",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const FIRST_NAME: FieldName = FieldName::new("first_name");
pub(crate) const LAST_NAME: FieldName = FieldName::new("last_name");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const ID: FieldName = FieldName::new("id");

fn field_error(field: FieldName, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::shape_invalid(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn name_label(field: FieldName) -> &'static str {
    match field.as_str() {
        "first_name" => "First name",
        "last_name" => "Last name",
        other => other,
    }
}

/// Validate a required first or last name.
pub(crate) fn parse_person_name(value: Option<String>, field: FieldName) -> Result<PersonName, Error> {
    let label = name_label(field);
    let raw = value.ok_or_else(|| {
        field_error(field, format!("{label} is required"), ErrorCode::MissingField)
    })?;
    PersonName::new(raw).map_err(|err| match err {
        UserValidationError::NameTooLong { max } => field_error(
            field,
            format!("{label} must be between 1 and {max} characters"),
            ErrorCode::InvalidLength,
        ),
        _ => field_error(field, format!("{label} is required"), ErrorCode::MissingField),
    })
}

/// Validate a required email address.
pub(crate) fn parse_email(value: Option<String>) -> Result<EmailAddress, Error> {
    let raw = value
        .ok_or_else(|| field_error(EMAIL, "Email is required", ErrorCode::MissingField))?;
    EmailAddress::new(raw).map_err(|err| match err {
        UserValidationError::EmailTooLong { max } => field_error(
            EMAIL,
            format!("Email must be at most {max} characters"),
            ErrorCode::TooLong,
        ),
        UserValidationError::InvalidEmail => field_error(
            EMAIL,
            "Incorrect email formatting. Try next pattern: 'some_information@mail.com'",
            ErrorCode::InvalidEmail,
        ),
        _ => field_error(EMAIL, "Email is required", ErrorCode::MissingField),
    })
}

/// Parse a numeric record identifier from a path segment.
pub(crate) fn parse_user_id(value: &str) -> Result<UserId, Error> {
    value
        .parse::<i64>()
        .map(UserId::new)
        .map_err(|_| field_error(ID, "id must be an integer", ErrorCode::InvalidId))
}

/// Build a page request from optional query values, applying defaults.
pub(crate) fn parse_page_request(page: Option<i64>, size: Option<i64>) -> Result<PageRequest, Error> {
    PageRequest::from_signed(
        page.unwrap_or(i64::from(DEFAULT_PAGE_NUMBER)),
        size.unwrap_or(i64::from(DEFAULT_PAGE_SIZE)),
    )
    .map_err(|err| {
        let field = match err {
            PageRequestError::NegativePage { .. } => FieldName::new("page"),
            PageRequestError::NonPositiveSize { .. } => FieldName::new("size"),
            PageRequestError::OutOfRange { field, .. } => FieldName::new(field),
        };
        field_error(field, err.to_string(), ErrorCode::InvalidPage)
    })
}

/// JSON extractor configuration reporting malformed bodies as shape failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        warn!(error = %err, "rejected request body");
        Error::shape_invalid("Request body is not valid JSON")
            .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }))
            .into()
    })
}

/// Query extractor configuration reporting malformed parameters as shape failures.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        warn!(error = %err, "rejected query string");
        Error::shape_invalid("Query parameters are not valid")
            .with_details(json!({ "code": ErrorCode::InvalidQuery.as_str() }))
            .into()
    })
}
