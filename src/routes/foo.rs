//! # routes::foo
//!
//! Handlers for the `/api/foos` resource. Each one only ever returns
//! `Failure` on the error path; rendering is left to the advice layer.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::info;

use crate::{
    auth::Principal,
    error::Failure,
    extract::{QueryParams, ValidatedJson},
    models::Foo,
    state::SharedState,
};

// ─── GET /api/foos ────────────────────────────────────────────────────────────

pub async fn list_foos(
    State(state): State<SharedState>,
    principal: Principal,
) -> Result<Json<Vec<Foo>>, Failure> {
    let foos = state.foos.find_all(&principal)?;
    Ok(Json(foos))
}

// ─── GET /api/foos/lookup?id= ─────────────────────────────────────────────────

pub async fn lookup_foo(
    State(state): State<SharedState>,
    params: QueryParams,
) -> Result<Json<Foo>, Failure> {
    let id: u64 = params.require_as("id")?;
    let foo = state.foos.find_by_id(id)?;
    Ok(Json(foo))
}

// ─── POST /api/foos/validate ──────────────────────────────────────────────────

pub async fn validate_foo(ValidatedJson(foo): ValidatedJson<Foo>) -> impl IntoResponse {
    info!(name = %foo.name, "✅ Foo passed validation");

    (
        StatusCode::OK,
        Json(json!({
            "ok":    true,
            "valid": true,
            "name":  foo.name,
        })),
    )
}

// ─── Tests ────────────────────────────────────────────────────────────────────
