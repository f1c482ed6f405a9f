//! Error types of ECS.

use thiserror::Error;

use crate::{system::SystemId, Entity};

/// Result of any ECS operation which can fail.
pub type Result<T> = std::result::Result<T, EcsError>;

/// Error that can happen while manipulating entities, components or systems.
///
/// All of these are programmer or configuration errors:
/// the offending operation is aborted and nothing is retried.
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    #[error("component `{component}` is not attached to {entity}")]
    ComponentNotFound {
        entity: Entity,
        component: &'static str,
    },

    #[error("storage of component `{component}` is exhausted (capacity {capacity})")]
    StorageExhausted {
        component: &'static str,
        capacity: usize,
    },

    #[error("cannot register component `{component}`: mask supports at most {limit} component types")]
    MaskOverflow {
        component: &'static str,
        limit: usize,
    },

    #[error("{0} was never created by this world")]
    UnknownEntity(Entity),

    #[error("system #{0} is not registered")]
    UnknownSystem(SystemId),

    #[error("storage of component `{component}` is already mutably borrowed")]
    ComponentBorrowed { component: &'static str },
}
