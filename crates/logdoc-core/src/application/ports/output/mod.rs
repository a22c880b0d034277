//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `logdoc-adapters` crate provides implementations.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{RelativeRef, TemplateParams, XmlDocument};
use crate::error::LogdocResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `logdoc_adapters::filesystem::LocalFilesystem` (production)
/// - `logdoc_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `read_to_string` reports a missing file as `ApplicationError::NotFound`
/// - Permission checks are best-effort probes, not guarantees
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if a directory can be listed and its files read.
    fn is_readable(&self, path: &Path) -> bool;

    /// Check if new entries can be created under a directory.
    fn is_writable(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> LogdocResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> LogdocResult<String>;

    /// Write content to a file, replacing whatever was there.
    fn write_file(&self, path: &Path, content: &str) -> LogdocResult<()>;
}

/// Port for turning markup text into a document tree.
///
/// Implemented by `logdoc_adapters::markup::XmlParser`.
pub trait MarkupParser: Send + Sync {
    /// Parse `text`. `name` is only used for diagnostics.
    fn parse(&self, name: &str, text: &str) -> LogdocResult<XmlDocument>;
}

/// Port for template source lookup.
///
/// Implemented by:
/// - `logdoc_adapters::template_store::EmbeddedTemplateStore` (built-in templates)
/// - `logdoc_adapters::template_store::DirectoryTemplateStore` (user overrides)
pub trait TemplateStore: Send + Sync {
    /// Template source for a logical path, `None` when the store lacks it.
    fn load(&self, path: &RelativeRef) -> LogdocResult<Option<String>>;

    /// All logical template paths, sorted.
    fn list(&self) -> LogdocResult<Vec<String>>;
}

/// Capability handed to the template engine for the duration of a render:
/// given a relative reference, produce readable content.
///
/// Implemented by [`crate::application::Resolver`].
pub trait ContentResolver: Send + Sync {
    /// Template (or auxiliary text file) source, `None` if nothing matches.
    fn resolve_template(&self, reference: &str) -> LogdocResult<Option<String>>;

    /// Load and parse an input document from the base directory.
    fn load_document(&self, reference: &str) -> LogdocResult<XmlDocument>;
}

/// Port for template rendering.
///
/// Implemented by `logdoc_adapters::renderer::MiniJinjaEngine`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateEngine: Send + Sync {
    /// Render `template` against `source`.
    ///
    /// # Arguments
    ///
    /// * `template` - Logical template path, resolved through `resolver`
    /// * `source` - Document bound as `doc`
    /// * `params` - String parameters bound by name
    /// * `resolver` - Lookup for templates, includes and extra documents
    ///
    /// # Errors
    ///
    /// `TemplateConfiguration` when the template is missing or does not
    /// compile, `TemplateExecution` when rendering fails.
    fn render(
        &self,
        template: &str,
        source: &XmlDocument,
        params: &TemplateParams,
        resolver: Arc<dyn ContentResolver>,
    ) -> LogdocResult<String>;
}
