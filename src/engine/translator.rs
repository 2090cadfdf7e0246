//! # engine::translator
//!
//! Turns a [`Failure`] into the [`ErrorResponse`] the client receives.
//!
//! ## Dispatch
//!
//! [`DISPATCH`] is an ordered list of `(kind, render)` rules. The first rule
//! whose kind matches the failure renders it. A failure whose kind has no
//! rule, or whose rule declines, falls through to [`unexpected`], so a newly
//! added [`FailureKind`] is answered with a 500 until someone maps it.
//!
//! | Kind                    | Status | Title                    |
//! |-------------------------|--------|--------------------------|
//! | `Forbidden`             | 403    | signal message           |
//! | `NoHandlerFound`        | 404    | `Not found`              |
//! | `MethodNotSupported`    | 405    | `Method not allowed`     |
//! | `MediaTypeNotSupported` | 415    | `Unsupported Media Type` |
//! | `AccessDenied`          | 403    | `Forbidden`              |
//! | `MissingParameter`      | 400    | `Bad request`            |
//! | `ConstraintViolations`  | 400    | `Bad request - v2`       |
//! | `TypeMismatch`          | 400    | `Bad req - v3`           |
//! | `MalformedBody`         | 400    | `Bad request`            |
//! | `RequestRejected`       | 500    | `Unexpected error`       |
//! | anything else           | 500    | `Unexpected Error`       |

use axum::http::StatusCode;
use tracing::{debug, error, warn, Span};

use crate::{
    error::{Failure, FailureKind},
    models::ErrorResponse,
};

/// Render rule. Returns `None` when handed a failure of another kind.
pub type Render = fn(&Failure) -> Option<ErrorResponse>;

pub const DISPATCH: &[(FailureKind, Render)] = &[
    (FailureKind::Forbidden, render_forbidden),
    (FailureKind::NoHandlerFound, render_no_handler),
    (FailureKind::MethodNotSupported, render_method_not_supported),
    (FailureKind::MediaTypeNotSupported, render_media_type_not_supported),
    (FailureKind::AccessDenied, render_access_denied),
    (FailureKind::MissingParameter, render_missing_parameter),
    (FailureKind::ConstraintViolations, render_constraint_violations),
    (FailureKind::TypeMismatch, render_type_mismatch),
    (FailureKind::MalformedBody, render_malformed_body),
    (FailureKind::RequestRejected, render_request_rejected),
];

const UNEXPECTED_DETAIL: &str = "error occurred";

// ─── Translator ───────────────────────────────────────────────────────────────

/// Stateless apart from the span it logs into; cheap to clone and safe to
/// share between concurrent requests.
#[derive(Debug, Clone)]
pub struct ErrorTranslator {
    span: Span,
}

impl ErrorTranslator {
    /// `span` is the logging capability: every trace the translator emits is
    /// recorded inside it.
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    pub fn translate(&self, failure: &Failure) -> ErrorResponse {
        self.translate_with(DISPATCH, failure)
    }

    pub fn translate_with(&self, table: &[(FailureKind, Render)], failure: &Failure) -> ErrorResponse {
        let _entered = self.span.enter();
        let kind = failure.kind();
        debug!(?kind, "translating failure");

        let response = table
            .iter()
            .find(|(rule_kind, _)| *rule_kind == kind)
            .and_then(|(_, render)| render(failure))
            .unwrap_or_else(|| unexpected(failure));

        debug!(?kind, response = %response, "failure translated");
        response
    }
}

// ─── Rules ────────────────────────────────────────────────────────────────────

fn render_forbidden(failure: &Failure) -> Option<ErrorResponse> {
    match failure {
        Failure::Forbidden(signal) => Some(ErrorResponse::new(signal.status(), signal.message())),
        _ => None,
    }
}

fn render_no_handler(failure: &Failure) -> Option<ErrorResponse> {
    match failure {
        Failure::NoHandlerFound { method, url } => Some(
            ErrorResponse::new(StatusCode::NOT_FOUND, "Not found")
                .with_detail(format!("No handler found for {method} {url}")),
        ),
        _ => None,
    }
}

fn render_method_not_supported(failure: &Failure) -> Option<ErrorResponse> {
    match failure {
        Failure::MethodNotSupported { method, supported } => {
            let mut detail =
                format!("{method} method is not supported for this request. Supported methods are ");
            for allowed in supported {
                detail.push_str(allowed.as_str());
                detail.push(' ');
            }
            Some(
                ErrorResponse::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
                    .with_detail(trim_trailing_separator(&detail)),
            )
        }
        _ => None,
    }
}

fn render_media_type_not_supported(failure: &Failure) -> Option<ErrorResponse> {
    match failure {
        Failure::MediaTypeNotSupported { content_type, supported } => {
            let mut detail = format!(
                "{} media type is not supported. Supported media types are ",
                content_type.as_deref().unwrap_or("(none)")
            );
            for accepted in supported {
                detail.push_str(accepted);
                detail.push_str(", ");
            }
            Some(
                ErrorResponse::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type")
                    .with_detail(trim_trailing_separator(&detail)),
            )
        }
        _ => None,
    }
}

fn render_access_denied(failure: &Failure) -> Option<ErrorResponse> {
    match failure {
        Failure::AccessDenied { reason } => Some(
            ErrorResponse::new(StatusCode::FORBIDDEN, "Forbidden")
                .with_detail(trim_trailing_separator(reason)),
        ),
        _ => None,
    }
}

fn render_missing_parameter(failure: &Failure) -> Option<ErrorResponse> {
    match failure {
        Failure::MissingParameter { name } => Some(
            ErrorResponse::new(StatusCode::BAD_REQUEST, "Bad request")
                .with_detail(format!("{name} parameter is missing")),
        ),
        _ => None,
    }
}

fn render_constraint_violations(failure: &Failure) -> Option<ErrorResponse> {
    match failure {
        Failure::ConstraintViolations(violations) => {
            let lines = violations.iter().map(ToString::to_string).collect();
            Some(ErrorResponse::new(StatusCode::BAD_REQUEST, "Bad request - v2").with_lines(lines))
        }
        _ => None,
    }
}

fn render_type_mismatch(failure: &Failure) -> Option<ErrorResponse> {
    match failure {
        Failure::TypeMismatch { name, required_type } => Some(
            ErrorResponse::new(StatusCode::BAD_REQUEST, "Bad req - v3")
                .with_detail(format!("{name} should be of type {required_type}")),
        ),
        _ => None,
    }
}

fn render_malformed_body(failure: &Failure) -> Option<ErrorResponse> {
    match failure {
        Failure::MalformedBody(reason) => Some(
            ErrorResponse::new(StatusCode::BAD_REQUEST, "Bad request")
                .with_detail(trim_trailing_separator(reason)),
        ),
        _ => None,
    }
}

fn render_request_rejected(failure: &Failure) -> Option<ErrorResponse> {
    match failure {
        Failure::RequestRejected(reason) => {
            warn!(%reason, "request rejected");
            Some(ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "Unexpected error"))
        }
        _ => None,
    }
}

/// Catch-all. The failure's own message is logged, never returned.
fn unexpected(failure: &Failure) -> ErrorResponse {
    match failure {
        Failure::NotFound(signal) => warn!(
            signal_message = signal.message(),
            signal_code = signal.code(),
            "not-found signal has no mapped response"
        ),
        other => error!(error = %other, kind = ?other.kind(), "unhandled failure"),
    }
    ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "Unexpected Error").with_detail(UNEXPECTED_DETAIL)
}

/// Drop the dangling delimiter left behind by append-then-separate joins.
fn trim_trailing_separator(text: &str) -> String {
    text.trim_end_matches(|c: char| c == ',' || c.is_whitespace()).to_string()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::http::Method;

    use super::*;
    use crate::{
        models::{api_error::Detail, ForbiddenSignal, NotFoundSignal},
        validation::ConstraintViolation,
    };

    fn translator() -> ErrorTranslator {
        ErrorTranslator::new(Span::none())
    }

    fn text(response: &ErrorResponse) -> &str {
        match &response.detail {
            Some(Detail::Text(text)) => text,
            other => panic!("expected text detail, got {other:?}"),
        }
    }

    #[test]
    fn forbidden_signal_uses_its_own_message() {
        let response = translator().translate(&ForbiddenSignal::new().into());
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.title, "Forbidden");
        assert_eq!(response.detail, None);
    }

    #[test]
    fn undefined_route_is_404_with_method_and_url() {
        let response = translator().translate(&Failure::NoHandlerFound {
            method: Method::GET,
            url: "/api/nope?x=1".into(),
        });
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.title, "Not found");
        assert_eq!(text(&response), "No handler found for GET /api/nope?x=1");
    }

    #[test]
    fn unsupported_method_lists_allowed_methods() {
        let response = translator().translate(&Failure::MethodNotSupported {
            method: Method::DELETE,
            supported: vec![Method::GET, Method::HEAD],
        });
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.title, "Method not allowed");
        assert_eq!(
            text(&response),
            "DELETE method is not supported for this request. Supported methods are GET HEAD"
        );
    }

    #[test]
    fn media_type_list_has_no_dangling_comma() {
        let response = translator().translate(&Failure::MediaTypeNotSupported {
            content_type: Some("text/plain".into()),
            supported: vec!["application/json".into(), "application/xml".into()],
        });
        assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(response.title, "Unsupported Media Type");
        assert_eq!(
            text(&response),
            "text/plain media type is not supported. Supported media types are application/json, application/xml"
        );
    }

    #[test]
    fn access_denial_reports_reason() {
        let response = translator().translate(&Failure::AccessDenied {
            reason: "no ROLE_ADMIN".into(),
        });
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.title, "Forbidden");
        assert_eq!(text(&response), "no ROLE_ADMIN");
    }

    #[test]
    fn access_denial_trims_trailing_separator() {
        let response = translator().translate(&Failure::AccessDenied {
            reason: "no ROLE_ADMIN, ".into(),
        });
        assert_eq!(text(&response), "no ROLE_ADMIN");
    }

    #[test]
    fn missing_parameter_names_it() {
        let response = translator().translate(&Failure::MissingParameter { name: "id".into() });
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.title, "Bad request");
        assert_eq!(text(&response), "id parameter is missing");
    }

    #[test]
    fn two_violations_give_two_lines() {
        let violation = |path: &str, message: &str| ConstraintViolation {
            root_type: "foo_api::models::foo::Foo",
            property_path: path.into(),
            message: message.into(),
        };
        let response = translator().translate(&Failure::ConstraintViolations(vec![
            violation("name", "must not be blank"),
            violation("owner.email", "must be a well-formed email address"),
        ]));
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.title, "Bad request - v2");
        assert_eq!(
            response.detail,
            Some(Detail::Lines(vec![
                "foo_api::models::foo::Foo name: must not be blank".into(),
                "foo_api::models::foo::Foo owner.email: must be a well-formed email address".into(),
            ]))
        );
    }

    #[test]
    fn type_mismatch_names_parameter_and_type() {
        let response = translator().translate(&Failure::TypeMismatch {
            name: "id".into(),
            required_type: "u64",
        });
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.title, "Bad req - v3");
        assert_eq!(text(&response), "id should be of type u64");
    }

    #[test]
    fn malformed_body_is_400() {
        let response = translator().translate(&Failure::MalformedBody("expected value at line 1".into()));
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.title, "Bad request");
    }

    #[test]
    fn request_rejection_hides_reason() {
        let response = translator().translate(&Failure::RequestRejected("header smuggling".into()));
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.title, "Unexpected error");
        assert_eq!(response.detail, None);
    }

    #[test]
    fn unhandled_failure_discards_its_message() {
        let response = translator().translate(&Failure::Unhandled(anyhow!("db password is hunter2")));
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.title, "Unexpected Error");
        assert_eq!(text(&response), "error occurred");
    }

    #[test]
    fn not_found_signal_falls_to_catch_all() {
        let response = translator().translate(&NotFoundSignal::new("Foo 9 does not exist", "FOO-404").into());
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.title, "Unexpected Error");
        assert_eq!(text(&response), "error occurred");
    }

    #[test]
    fn unmapped_kind_still_gets_a_response() {
        let failure = Failure::MissingParameter { name: "id".into() };
        let response = translator().translate_with(&[], &failure);
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.title, "Unexpected Error");
    }

    #[test]
    fn first_matching_rule_wins() {
        fn teapot(_: &Failure) -> Option<ErrorResponse> {
            Some(ErrorResponse::new(StatusCode::IM_A_TEAPOT, "Teapot"))
        }
        let table: &[(FailureKind, Render)] = &[
            (FailureKind::MissingParameter, teapot),
            (FailureKind::MissingParameter, render_missing_parameter),
        ];
        let response = translator().translate_with(table, &Failure::MissingParameter { name: "id".into() });
        assert_eq!(response.status, StatusCode::IM_A_TEAPOT);
    }

    #[test]
    fn every_rule_declines_other_kinds() {
        let stray = Failure::Unhandled(anyhow!("boom"));
        for (kind, render) in DISPATCH {
            assert!(render(&stray).is_none(), "{kind:?} rule rendered an Unhandled failure");
        }
    }

    #[test]
    fn trims_commas_and_spaces_only_at_the_end() {
        assert_eq!(trim_trailing_separator("a, b, "), "a, b");
        assert_eq!(trim_trailing_separator("GET HEAD "), "GET HEAD");
        assert_eq!(trim_trailing_separator("plain"), "plain");
    }
}
