//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "load a definition" or "generate sources".

pub mod definition_loader;
pub mod generator;
pub mod resolver;
pub mod transformer;

#[cfg(test)]
pub(crate) mod test_support;

pub use definition_loader::{DefinitionLoader, LOG_FILE, LoadOptions, LoadedDefinition};
pub use generator::{GenerateOptions, GenerationReport, Generator};
pub use resolver::Resolver;
pub use transformer::Transformer;
