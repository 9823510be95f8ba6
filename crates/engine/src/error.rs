//! Engine-level error type for the import pipeline.

use thiserror::Error;

use hexmapr_domain::{DomainError, EntityId};

use crate::infrastructure::ports::StoreError;

/// Anything that can abort an import. Every variant is fatal: there is no
/// partial commit and no rollback of already-created host documents.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Malformed top-level file shape.
    #[error("The sector file could not be read: {0}")]
    Format(#[from] serde_json::Error),

    /// A data-integrity violation in the sector tree.
    #[error(transparent)]
    Integrity(#[from] DomainError),

    /// A host-store or renderer call failed. Not retried.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A content-update phase found a node without its journal placeholder.
    #[error("Couldn't find the journal for entity {id}")]
    MissingJournal { id: EntityId },
}
