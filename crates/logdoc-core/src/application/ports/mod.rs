//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `logdoc-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `MarkupParser`: Markup text to document tree
//!   - `TemplateStore`: Template source lookup
//!   - `TemplateEngine`: Template rendering
//!
//! - **Capabilities**: Implemented by the application, handed to adapters
//!   - `ContentResolver`: Relative reference to content, used while rendering

pub mod output;

pub use output::{ContentResolver, Filesystem, MarkupParser, TemplateEngine, TemplateStore};

#[cfg(test)]
pub use output::MockTemplateEngine;
