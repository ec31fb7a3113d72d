//! Actix rendering of domain errors.
//!
//! Handlers return [`ApiResult`]; any [`Error`] they yield becomes a JSON body
//! with the status from [`status_for`] and a `trace-id` header when the error
//! carries one. Only [`Error::public_view`] is ever serialised.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// HTTP status for a domain error code.
///
/// Missing inputs and shape failures both surface as `406 Not Acceptable`.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MissingInput | ErrorCode::ShapeInvalid => StatusCode::NOT_ACCEPTABLE,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError => {
                error!(code = ?self.code(), message = self.message(), trace_id = ?self.trace_id(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(code = ?self.code(), message = self.message(), trace_id = ?self.trace_id(), "request failed");
            }
            _ => {}
        }

        let body = self.public_view();
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = body.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(body)
    }
}
