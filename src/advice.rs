//! # advice — failure interception middleware
//!
//! Sits outside every route (and the router fallback) and rewrites failed
//! responses into translated [`ErrorResponse`](crate::models::ErrorResponse)
//! bodies:
//!
//! 1. a response carrying a parked [`RaisedFailure`] is replaced by the
//!    translator's rendering of that failure;
//! 2. a bare `405` from axum's method router becomes
//!    [`Failure::MethodNotSupported`], built from the `Allow` header;
//! 3. a handler panic, caught by [`catch_panic`], arrives as case 1.
//!
//! Everything else passes through untouched.

use std::any::Any;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::{
    error::{Failure, RaisedFailure},
    state::SharedState,
};

pub async fn translate_failures(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let mut response = next.run(request).await;

    if let Some(RaisedFailure(failure)) = response.extensions_mut().remove::<RaisedFailure>() {
        return state.translator.translate(&failure).into_response();
    }

    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        let allow = response.headers().get(header::ALLOW).cloned();
        let failure = Failure::MethodNotSupported {
            method,
            supported: allowed_methods(response.headers()),
        };
        debug!(%failure, "method router refused request");

        let mut translated = state.translator.translate(&failure).into_response();
        if let Some(allow) = allow {
            translated.headers_mut().insert(header::ALLOW, allow);
        }
        return translated;
    }

    response
}

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn catch_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let reason = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(reason, "🔥 Handler panicked");

    Failure::Unhandled(anyhow::anyhow!("handler panicked: {reason}")).into_response()
}

fn allowed_methods(headers: &HeaderMap) -> Vec<Method> {
    headers
        .get_all(header::ALLOW)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| Method::from_bytes(name.as_bytes()).ok())
        .collect()
}
