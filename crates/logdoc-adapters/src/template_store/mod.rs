//! Template stores.

mod directory;
mod embedded;

pub use directory::DirectoryTemplateStore;
pub use embedded::EmbeddedTemplateStore;
