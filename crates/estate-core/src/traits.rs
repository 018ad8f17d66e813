//! Core traits shared across layers.

use async_trait::async_trait;

/// Trait for entities with a store-assigned identifier.
pub trait Entity {
    /// Identifier type.
    type Id: Copy + Ord + Send + Sync + std::fmt::Display;

    /// Returns the entity's identifier.
    fn id(&self) -> Self::Id;

    /// Replaces the identifier (used by stores on insert).
    fn set_id(&mut self, id: Self::Id);
}

/// Trait for health checks.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Returns the name of this health check.
    fn name(&self) -> &str;

    /// Performs the health check.
    async fn check(&self) -> HealthStatus;
}

/// Health check status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// The component is healthy.
    Healthy,
    /// The component is degraded but functional.
    Degraded(String),
    /// The component is unhealthy.
    Unhealthy(String),
}

impl HealthStatus {
    /// Returns true if the status is healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns true if the status is unhealthy.
    #[must_use]
    pub const fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }
}
