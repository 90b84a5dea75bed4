//! Engine error types.

use thiserror::Error;

use crate::api::types::EntityId;

/// Errors surfaced by entity operations and behavior dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No live entity has this id.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    /// No live entity is registered under this name.
    #[error("no entity named {0:?}")]
    NameNotFound(String),

    /// The entity exists but carries no behavior of the expected kind.
    #[error("entity {0} has no matching behavior")]
    MissingBehavior(EntityId),

    /// A rigidbody operation was requested on a non-rigid entity.
    #[error("entity {0} is not rigid")]
    NotRigid(EntityId),
}
