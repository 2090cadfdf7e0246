//! # state
//!
//! Shared application state injected into every handler and into the advice
//! middleware. Nothing in it is mutable: requests share no data.

use std::sync::Arc;

use crate::{auth::RolePolicy, config::Config, engine::ErrorTranslator, service::FooService};

#[derive(Clone)]
pub struct AppState {
    /// Renders every failure that escapes a handler
    pub translator: ErrorTranslator,
    pub foos: FooService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            translator: ErrorTranslator::new(tracing::info_span!("error_translator")),
            foos: FooService::new(Arc::new(RolePolicy), config.admin_role.clone()),
        }
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(config: &Config) -> SharedState {
    Arc::new(AppState::new(config))
}
