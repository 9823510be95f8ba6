//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for:
//! - The host document store (folders, journals, the scene)
//! - Template rendering (the engine supplies data maps, never markup)
//! - Display-string lookup (translation lives with the host)

mod document_store;
mod error;
mod presentation;

pub use document_store::{
    DocumentStorePort, FolderSpec, GridKind, GridSpec, JournalSpec, LabelSpec, MarkerSpec,
    ObjectFlags, SceneSpec,
};
pub use error::StoreError;
pub use presentation::{EntityTemplate, LexiconPort, TemplateRendererPort};

// Test-only mocks (generated by mockall during test builds)
#[cfg(test)]
pub use document_store::MockDocumentStorePort;
#[cfg(test)]
pub use presentation::MockTemplateRendererPort;
