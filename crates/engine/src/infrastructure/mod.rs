//! Infrastructure: port traits and the adapters shipped with the engine.

pub mod lexicon;
pub mod memory_store;
pub mod ports;
pub mod text_renderer;

pub use lexicon::EnglishLexicon;
pub use memory_store::InMemoryDocumentStore;
pub use text_renderer::PlainTextRenderer;
