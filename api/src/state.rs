use axum::extract::FromRef;
use prometheus::Registry;
use std::sync::Arc;
use std::time::Instant;

use crate::service::ApplicationService;
use crate::store::ApplicationStore;
use crate::validation::{HeaderRules, MissingHeaderPolicy};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: ApplicationService,
    pub missing_header_policy: MissingHeaderPolicy,
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ApplicationStore>,
        header_rules: HeaderRules,
        missing_header_policy: MissingHeaderPolicy,
        registry: Registry,
    ) -> Self {
        Self {
            service: ApplicationService::new(store, header_rules),
            missing_header_policy,
            started_at: Instant::now(),
            registry,
        }
    }
}

impl FromRef<AppState> for MissingHeaderPolicy {
    fn from_ref(state: &AppState) -> Self {
        state.missing_header_policy
    }
}
