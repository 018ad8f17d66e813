//! Application state for Axum handlers.

use estate_core::HealthCheck;
use estate_service::{HouseService, UserService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub house_service: Arc<dyn HouseService>,
    /// Dependencies checked by `/ready`.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    /// Name of the active cache backend, reported by `/ready`.
    pub cache_backend: &'static str,
}

impl AppState {
    /// Creates a new application state with no readiness checks.
    pub fn new(
        user_service: Arc<dyn UserService>,
        house_service: Arc<dyn HouseService>,
        cache_backend: &'static str,
    ) -> Self {
        Self {
            user_service,
            house_service,
            health_checks: Vec::new(),
            cache_backend,
        }
    }

    /// Adds a dependency to the readiness check.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
