//! HTTP adapter mapping for domain errors.
//!
//! Handlers return [`ApiResult`]; actix renders the error half through the
//! [`ResponseError`] impl below as a status code plus `{ "message": ... }`.
//! Internal failures are redacted so driver messages never reach clients.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message sent to clients in place of any internal error.
pub const INTERNAL_ERROR_MESSAGE: &str = ErrorCode::InternalError.fallback_message();

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_message(error: &Error) -> &str {
    match error.code() {
        ErrorCode::InternalError => INTERNAL_ERROR_MESSAGE,
        _ => error.message(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        builder.json(ErrorBody {
            message: client_message(self),
        })
    }
}
