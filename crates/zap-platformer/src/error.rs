//! Error types for setup and configuration.
//!
//! Ticks never fail: once a component is initialized, lookups that go stale
//! degrade to no-ops. Everything here is raised while activating a scene.

use crate::api::types::EntityId;

#[derive(Debug, thiserror::Error)]
pub enum PlatformerError {
    /// The controlled entity is not in the scene.
    #[error("entity {0:?} is not in the scene")]
    EntityNotFound(EntityId),

    /// The entity has no rigid body, or its body was removed from the world.
    #[error("entity {0:?} has no rigid body")]
    MissingBody(EntityId),

    /// The body's collider is gone or has a shape probes cannot size.
    #[error("entity {0:?} has no usable collider")]
    MissingCollider(EntityId),

    /// A tuning value is out of range.
    #[error("invalid {field}: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    #[error("failed to read config: {0}")]
    ConfigRead(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[source] serde_json::Error),
}

impl PlatformerError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Reject negative or non-finite tuning values.
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), PlatformerError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlatformerError::invalid(
            field,
            format!("expected a finite value >= 0, got {value}"),
        ));
    }
    Ok(())
}
