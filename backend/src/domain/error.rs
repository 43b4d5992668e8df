//! Transport-neutral failure type returned by the user use-cases.
//!
//! The HTTP adapter picks a status from [`ErrorCode`] and shows
//! [`Error::message`] to the client, except for internal errors whose text
//! is replaced before it leaves the process.

use std::fmt;

use thiserror::Error as ThisError;

use super::TraceId;

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Input failed validation.
    InvalidRequest,
    /// No user matches the identifier.
    NotFound,
    /// A store or other dependency failed.
    InternalError,
}

impl ErrorCode {
    /// Message used when an error is raised with blank text.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request.",
            Self::NotFound => "Not found.",
            Self::InternalError => "Internal server error.",
        }
    }
}

/// Rejection from [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ErrorValidationError {
    /// The message was empty or whitespace.
    #[error("error message must not be empty")]
    EmptyMessage,
}

/// A categorised failure with a client-facing message.
///
/// The trace id of the request in scope, if any, is captured on creation.
///
/// # Examples
/// ```
/// use roster::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("User not found.");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "User not found.");
///
/// assert_eq!(Error::invalid_request("  ").message(), "Invalid request.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<TraceId>,
}

impl Error {
    /// Build an error; blank text is replaced by
    /// [`ErrorCode::fallback_message`].
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message)
            .unwrap_or_else(|_| Self::capture(code, code.fallback_message().to_owned()))
    }

    /// Build an error, rejecting blank text.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let text = message.into();
        if text.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::capture(code, text))
    }

    fn capture(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            trace_id: TraceId::current(),
        }
    }

    /// [`ErrorCode::InvalidRequest`] with `message`.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::NotFound`] with `message`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::InternalError`] with `message`; the text is for logs only.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace id of the request that raised the error.
    pub fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
