//! # service — Foo service
//!
//! Holds no data. `find_all` is guarded by the admin role and otherwise
//! returns an empty list; `find_by_id` has nothing to find.

use std::sync::Arc;

use tracing::debug;

use crate::{
    auth::{require_role, AccessPolicy, Principal},
    error::Failure,
    models::{Foo, NotFoundSignal},
};

pub const FOO_NOT_FOUND: &str = "FOO-404";

#[derive(Clone)]
pub struct FooService {
    policy: Arc<dyn AccessPolicy>,
    admin_role: String,
}

impl FooService {
    pub fn new(policy: Arc<dyn AccessPolicy>, admin_role: impl Into<String>) -> Self {
        Self {
            policy,
            admin_role: admin_role.into(),
        }
    }

    pub fn find_all(&self, principal: &Principal) -> Result<Vec<Foo>, Failure> {
        require_role(self.policy.as_ref(), principal, &self.admin_role)?;
        debug!(roles = ?principal.roles(), "listing foos");
        Ok(Vec::new())
    }

    pub fn find_by_id(&self, id: u64) -> Result<Foo, Failure> {
        Err(NotFoundSignal::new(format!("Foo {id} does not exist"), FOO_NOT_FOUND).into())
    }
}
