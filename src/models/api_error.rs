//! # models::api_error
//!
//! [`ErrorResponse`] is the body every failed request receives.
//!
//! ```json
//! { "status": 400, "title": "Bad request", "detail": "id parameter is missing" }
//! ```
//!
//! `detail` is omitted, a single string, or an ordered list of strings
//! depending on how much the failure carried.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};

/// Free-form detail attached to an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Detail {
    Text(String),
    Lines(Vec<String>),
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detail::Text(text) => f.write_str(text),
            Detail::Lines(lines) => write!(f, "[{}]", lines.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Detail>,
}

impl ErrorResponse {
    /// `title` must be non-empty; every title in the dispatch table is a
    /// fixed literal.
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        let title = title.into();
        debug_assert!(!title.is_empty(), "error title must not be empty");
        Self {
            status,
            title,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(Detail::Text(detail.into()));
        self
    }

    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.detail = Some(Detail::Lines(lines));
        self
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.title)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}
