//! HTTP error responses for non-streaming failure paths.
//!
//! The chat endpoint reports its failures in-stream; this type covers the
//! one non-streaming failure the router can produce, the unmatched-route
//! fallback.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Failure categories surfaced as plain HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No route matched the request path.
    NotFound,
}

impl ErrorKind {
    /// Returns the HTTP status code for this kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Returns the default user-facing message for this kind.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::NotFound => "Requested resource was not found",
        }
    }
}

/// The error type for HTTP handlers in the server.
#[derive(Debug, Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Sets a custom user-facing message for the error.
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }
}

/// JSON body of an error response.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse<'a> {
    message: &'a str,
    status_code: u16,
}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();
        let message = self
            .message
            .as_deref()
            .unwrap_or_else(|| self.kind.default_message());

        let body = ErrorResponse {
            message,
            status_code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}
