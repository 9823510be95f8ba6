//! Hexmapr Engine library.
//!
//! This crate turns a serialized sector file into a cross-linked document
//! set inside an abstract host store.
//!
//! ## Structure
//!
//! - `parser` - Sector file parsing into the flat entity map
//! - `tree_builder` / `ordering` - Tree construction and canonical ordering
//! - `tags` - Sector-wide tag registry
//! - `content` - Journal render payloads
//! - `import/` - The phase-ordered import pipeline
//! - `infrastructure/` - Ports and the adapters shipped with the engine

pub mod content;
pub mod error;
pub mod import;
pub mod infrastructure;
pub mod options;
pub mod ordering;
pub mod parser;
pub mod tags;
pub mod tree_builder;

/// Shared sector-file fixtures for the in-crate tests.
#[cfg(test)]
pub mod test_fixtures;


pub use error::ImportError;
pub use import::{ImportReport, SectorImporter};
pub use options::ImportOptions;
