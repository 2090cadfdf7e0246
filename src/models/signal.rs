//! # models::signal
//!
//! Signals raised by application code to short-circuit request handling.
//! Both travel inside [`crate::error::Failure`] until the translator turns
//! them into a response.

use axum::http::StatusCode;
use thiserror::Error;

// ─── ForbiddenSignal ──────────────────────────────────────────────────────────

/// Raised when the caller has no usable identity for a protected operation.
///
/// Carries no data: the status is always `403` and the message is always
/// `"Forbidden"`, whatever the call site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("Forbidden")]
pub struct ForbiddenSignal;

impl ForbiddenSignal {
    pub const fn new() -> Self {
        Self
    }

    pub const fn status(&self) -> StatusCode {
        StatusCode::FORBIDDEN
    }

    pub const fn message(&self) -> &'static str {
        "Forbidden"
    }
}

// ─── NotFoundSignal ───────────────────────────────────────────────────────────

/// Raised when a lookup fails.
///
/// `message` is human readable, `code` is an application-defined token
/// (e.g. `"FOO-404"`). Neither is validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({code})")]
pub struct NotFoundSignal {
    message: String,
    code: String,
}

impl NotFoundSignal {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}
