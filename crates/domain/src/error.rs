//! Unified error type for the domain layer.
//!
//! Every detected anomaly in a sector tree is a data-integrity violation: a
//! partially-built tree is unsafe to render (dangling cross-links, missing
//! journals), so there is no recoverable category here.

use thiserror::Error;

use crate::ids::EntityId;

/// Data-integrity errors raised while building or querying a sector tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The sector data contains no sector entity.
    #[error("The sector data could not be processed: no sector entity found")]
    RootNotFound,

    /// One or more entities could not be linked to a parent, either because
    /// the declared parent id is unknown or because the type/parent-kind
    /// combination matches no ordering bucket.
    #[error("Some entities are not linked with their parent: {}", join_ids(.ids))]
    UnlinkedEntities { ids: Vec<EntityId> },

    /// Walking the parent chain never reached a system or black hole.
    #[error("Entity {id} has no containing system")]
    NoContainingSystem { id: EntityId },

    /// The parent chain of an entity loops back on itself.
    #[error("The parent chain of entity {id} contains a cycle")]
    ParentCycle { id: EntityId },

    /// Parse error (for value objects such as entity kind tags).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation failed (e.g. invalid field values).
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create an unlinked-entities error from the offending ids.
    pub fn unlinked(ids: impl IntoIterator<Item = EntityId>) -> Self {
        Self::UnlinkedEntities {
            ids: ids.into_iter().collect(),
        }
    }

    /// Create a no-containing-system error.
    pub fn no_containing_system(id: impl Into<EntityId>) -> Self {
        Self::NoContainingSystem { id: id.into() }
    }

    /// Create a parent-cycle error.
    pub fn parent_cycle(id: impl Into<EntityId>) -> Self {
        Self::ParentCycle { id: id.into() }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

fn join_ids(ids: &[EntityId]) -> String {
    ids.iter()
        .map(EntityId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlinked_error_names_every_entity() {
        let err = DomainError::unlinked([EntityId::from("aaa"), EntityId::from("bbb")]);
        let message = err.to_string();
        assert!(message.contains("aaa"));
        assert!(message.contains("bbb"));
        assert!(message.contains("not linked"));
    }

    #[test]
    fn test_no_containing_system_error() {
        let err = DomainError::no_containing_system("deep-station-1");
        assert!(matches!(err, DomainError::NoContainingSystem { .. }));
        assert_eq!(
            err.to_string(),
            "Entity deep-station-1 has no containing system"
        );
    }

    #[test]
    fn test_parent_cycle_error() {
        let err = DomainError::parent_cycle("moon-7");
        assert!(err.to_string().contains("cycle"));
        assert!(err.to_string().contains("moon-7"));
    }

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("system sys-1 is missing grid coordinates");
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(err.to_string().starts_with("Validation failed"));
    }
}
