//! Infrastructure adapters for Logdoc.
//!
//! This crate implements the ports defined in `logdoc-core::application::ports`.
//! It contains all external dependencies and I/O operations: the XML parser,
//! the schema files, the template engine and the built-in template set.

pub mod filesystem;
pub mod markup;
pub mod renderer;
pub mod schema_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use markup::XmlParser;
pub use renderer::MiniJinjaEngine;
pub use schema_loader::{load_schema, load_schema_set};
pub use template_store::{DirectoryTemplateStore, EmbeddedTemplateStore};
