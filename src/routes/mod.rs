//! # routes
//!
//! | Method | Path                  | Description                                   |
//! |--------|-----------------------|-----------------------------------------------|
//! | GET    | `/health`             | Liveness probe                                |
//! | GET    | `/api/foos`           | List foos (admin only)                        |
//! | GET    | `/api/foos/lookup`    | Look a foo up by `?id=`                       |
//! | POST   | `/api/foos/validate`  | Check a JSON foo against its constraints      |
//! | *      | anything else         | 404 through the translator                    |

pub mod foo;

use axum::{
    http::{Method, Uri},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;

use crate::{advice, error::Failure, state::SharedState};

/// Full application router with every route and the advice layers.
pub fn router(state: SharedState) -> Router {
    let routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/foos", get(foo::list_foos))
        .route("/api/foos/lookup", get(foo::lookup_foo))
        .route("/api/foos/validate", post(foo::validate_foo));

    with_advice(routes, state)
}

/// Install the fallback, panic catcher and failure translator around `routes`.
///
/// The translator wraps the finished inner router as a whole service, so it
/// sees responses after each method router has added its `Allow` header.
pub fn with_advice(routes: Router<SharedState>, state: SharedState) -> Router {
    let inner = routes
        .fallback(no_handler)
        .layer(CatchPanicLayer::custom(advice::catch_panic))
        .with_state(state.clone());

    let advised = middleware::from_fn_with_state(state, advice::translate_failures).layer(inner);
    Router::new().fallback_service(advised)
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn no_handler(method: Method, uri: Uri) -> Failure {
    Failure::NoHandlerFound {
        method,
        url: uri.to_string(),
    }
}
