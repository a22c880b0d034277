//! Application layer for Logdoc.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (Generator, DefinitionLoader, Transformer)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! definition rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    DefinitionLoader, GenerateOptions, GenerationReport, Generator, LOG_FILE, LoadOptions,
    LoadedDefinition, Resolver, Transformer,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ContentResolver, Filesystem, MarkupParser, TemplateEngine, TemplateStore};

pub use error::ApplicationError;
