//! # extract
//!
//! Request extractors whose rejections are [`Failure`]s, so malformed
//! requests reach the translator like any other failure instead of being
//! answered by axum's built-in plain-text rejections.

use std::{collections::HashMap, str::FromStr};

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;

use crate::{
    error::Failure,
    validation::{validate, Validate},
};

pub const JSON_MEDIA_TYPE: &str = "application/json";

// ─── Query parameters ─────────────────────────────────────────────────────────

/// Raw query string parameters, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(pub HashMap<String, String>);

impl QueryParams {
    pub fn require(&self, name: &str) -> Result<&str, Failure> {
        self.0
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Failure::MissingParameter { name: name.to_string() })
    }

    /// Required parameter converted to `T`; a value that does not parse is a
    /// type mismatch naming `T`.
    pub fn require_as<T: FromStr>(&self, name: &str) -> Result<T, Failure> {
        self.require(name)?.parse().map_err(|_| Failure::TypeMismatch {
            name: name.to_string(),
            required_type: std::any::type_name::<T>(),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| Failure::MalformedBody(rejection.body_text()))?;
        Ok(Self(params))
    }
}

// ─── Validated JSON body ──────────────────────────────────────────────────────

/// JSON body that has passed its declared constraints.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| json_failure(rejection, content_type))?;

        validate(&value)?;
        Ok(Self(value))
    }
}

fn json_failure(rejection: JsonRejection, content_type: Option<String>) -> Failure {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => Failure::MediaTypeNotSupported {
            content_type,
            supported: vec![JSON_MEDIA_TYPE.to_string()],
        },
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            Failure::MalformedBody(rejection.body_text())
        }
        other => Failure::Unhandled(anyhow::anyhow!(other.body_text())),
    }
}
