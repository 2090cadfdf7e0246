//! # auth — Caller identity and role guard
//!
//! The caller's roles arrive in the `X-Roles` header as a comma separated
//! list. The service never trusts the header beyond that: whether a role
//! grants access is decided by an [`AccessPolicy`] handed to the service.
//!
//! ## Outcomes
//! - no `X-Roles` header → [`ForbiddenSignal`] (403, no detail)
//! - header present, role missing → [`Failure::AccessDenied`] with the
//!   policy's reason, e.g. `no ROLE_ADMIN`
//! - header not visible ASCII → [`Failure::RequestRejected`]
//!
//! ```bash
//! curl -H "X-Roles: ROLE_ADMIN" http://localhost:3000/api/foos
//! ```

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::{error::Failure, models::ForbiddenSignal};

pub const ROLES_HEADER: &str = "X-Roles";

// ─── Principal ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    roles: Vec<String>,
}

impl Principal {
    pub fn new<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ROLES_HEADER) else {
            warn!(path = parts.uri.path(), "❌ No caller identity — missing X-Roles header");
            return Err(ForbiddenSignal::new().into());
        };

        let raw = value
            .to_str()
            .map_err(|_| Failure::RequestRejected("X-Roles header is not visible ASCII".into()))?;

        Ok(Principal::new(
            raw.split(',').map(str::trim).filter(|role| !role.is_empty()),
        ))
    }
}

// ─── Access policy ────────────────────────────────────────────────────────────

/// Decides whether a principal holds a role. `Err` carries the denial reason
/// shown to the client.
pub trait AccessPolicy: Send + Sync {
    fn check(&self, principal: &Principal, role: &str) -> Result<(), String>;
}

/// Grants access when the principal carries the role verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl AccessPolicy for RolePolicy {
    fn check(&self, principal: &Principal, role: &str) -> Result<(), String> {
        if principal.has_role(role) {
            Ok(())
        } else {
            Err(format!("no {role}"))
        }
    }
}

/// Guard placed at the top of protected operations.
pub fn require_role(policy: &dyn AccessPolicy, principal: &Principal, role: &str) -> Result<(), Failure> {
    policy.check(principal, role).map_err(|reason| {
        warn!(role, %reason, "❌ Access denied");
        Failure::AccessDenied { reason }
    })
}
