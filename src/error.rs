//! # error
//!
//! Centralised failure type.
//!
//! Every handler and extractor returns `Result<_, Failure>`. A `Failure` is
//! never rendered where it is raised: its `IntoResponse` impl only parks it
//! on the response, and the advice middleware ([`crate::advice`]) hands it to
//! the [`ErrorTranslator`](crate::engine::translator::ErrorTranslator) which
//! produces the body clients actually see.

use std::sync::Arc;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    models::{ForbiddenSignal, NotFoundSignal},
    validation::ConstraintViolation,
};

#[derive(Debug, Error)]
pub enum Failure {
    /// Caller has no identity at all.
    #[error(transparent)]
    Forbidden(#[from] ForbiddenSignal),

    /// No route matched the request path.
    #[error("no handler found for {method} {url}")]
    NoHandlerFound { method: Method, url: String },

    /// The path exists but not for this method.
    #[error("{method} method is not supported")]
    MethodNotSupported { method: Method, supported: Vec<Method> },

    /// The body's `Content-Type` is missing or not one we accept.
    #[error("media type {content_type:?} is not supported")]
    MediaTypeNotSupported {
        content_type: Option<String>,
        supported: Vec<String>,
    },

    /// The access policy refused the caller.
    #[error("access denied: {reason}")]
    AccessDenied { reason: String },

    #[error("{name} parameter is missing")]
    MissingParameter { name: String },

    #[error("{} constraint violation(s)", .0.len())]
    ConstraintViolations(Vec<ConstraintViolation>),

    #[error("{name} should be of type {required_type}")]
    TypeMismatch {
        name: String,
        required_type: &'static str,
    },

    /// Body could not be parsed into the expected shape.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// Request refused before reaching a handler (e.g. a header we will not
    /// process).
    #[error("request rejected: {0}")]
    RequestRejected(String),

    /// Lookup failed. Has no dispatch entry; renders through the catch-all.
    #[error(transparent)]
    NotFound(#[from] NotFoundSignal),

    /// Anything else, including handler panics.
    #[error(transparent)]
    Unhandled(#[from] anyhow::Error),
}

/// Tag used by the dispatch table to select a render rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Forbidden,
    NoHandlerFound,
    MethodNotSupported,
    MediaTypeNotSupported,
    AccessDenied,
    MissingParameter,
    ConstraintViolations,
    TypeMismatch,
    MalformedBody,
    RequestRejected,
    NotFound,
    Unhandled,
}

impl Failure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::Forbidden(_) => FailureKind::Forbidden,
            Failure::NoHandlerFound { .. } => FailureKind::NoHandlerFound,
            Failure::MethodNotSupported { .. } => FailureKind::MethodNotSupported,
            Failure::MediaTypeNotSupported { .. } => FailureKind::MediaTypeNotSupported,
            Failure::AccessDenied { .. } => FailureKind::AccessDenied,
            Failure::MissingParameter { .. } => FailureKind::MissingParameter,
            Failure::ConstraintViolations(_) => FailureKind::ConstraintViolations,
            Failure::TypeMismatch { .. } => FailureKind::TypeMismatch,
            Failure::MalformedBody(_) => FailureKind::MalformedBody,
            Failure::RequestRejected(_) => FailureKind::RequestRejected,
            Failure::NotFound(_) => FailureKind::NotFound,
            Failure::Unhandled(_) => FailureKind::Unhandled,
        }
    }
}

/// A failure parked on a response, waiting for the advice layer.
#[derive(Debug, Clone)]
pub struct RaisedFailure(pub Arc<Failure>);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        // 500 only survives if the advice layer is not installed.
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response
            .extensions_mut()
            .insert(RaisedFailure(Arc::new(self)));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_convert_into_failures() {
        let forbidden: Failure = ForbiddenSignal::new().into();
        assert_eq!(forbidden.kind(), FailureKind::Forbidden);

        let missing: Failure = NotFoundSignal::new("Foo 1 does not exist", "FOO-404").into();
        assert_eq!(missing.kind(), FailureKind::NotFound);
        assert_eq!(missing.to_string(), "Foo 1 does not exist (FOO-404)");
    }

    #[test]
    fn into_response_parks_the_failure() {
        let response = Failure::MissingParameter { name: "id".into() }.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let parked = response.extensions().get::<RaisedFailure>().unwrap();
        assert_eq!(parked.0.kind(), FailureKind::MissingParameter);
        assert_eq!(parked.0.to_string(), "id parameter is missing");
    }
}
